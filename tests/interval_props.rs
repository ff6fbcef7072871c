use std::collections::HashSet;

use lookup_index::{
    Level, Mergeable, ResultStructure, SearchStructure, TwoColumnRange, TwoColumnRangeStructure,
};
use proptest::prelude::*;

type Intervals = TwoColumnRangeStructure<i32, ResultStructure<u8>>;

fn interval() -> impl Strategy<Value = TwoColumnRange<i32>> {
    (
        proptest::option::weighted(0.9, 0i32..40),
        proptest::option::weighted(0.9, 0i32..40),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_filter_map("interval must contain a point", |(lower, upper, li, ui)| {
            TwoColumnRange::new(lower, upper, li, ui).ok()
        })
}

fn puts() -> impl Strategy<Value = Vec<(TwoColumnRange<i32>, u8)>> {
    proptest::collection::vec((interval(), 0u8..6), 0..12)
}

fn build(puts: &[(TwoColumnRange<i32>, u8)]) -> Intervals {
    let mut level = Intervals::new();
    for (range, value) in puts {
        level.put(range.clone(), ResultStructure::single(*value));
    }
    level
}

/// Union of the values of every put interval containing `point`.
fn naive(puts: &[(TwoColumnRange<i32>, u8)], point: i32) -> HashSet<u8> {
    puts.iter()
        .filter(|(range, _)| range.contains(&point))
        .map(|(_, value)| *value)
        .collect()
}

proptest! {
    #[test]
    fn stored_intervals_stay_disjoint(puts in puts()) {
        let level = build(&puts);
        prop_assert!(level.is_disjoint(), "stored intervals overlap");

        let ranges: Vec<_> = level.ranges().collect();
        for pair in ranges.windows(2) {
            prop_assert!(!pair[0].overlaps(pair[1]), "{} overlaps {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn lookups_agree_with_naive_union(puts in puts()) {
        let level = build(&puts);
        for point in -2..42 {
            prop_assert_eq!(level.get(&point).results(), naive(&puts, point), "point {}", point);
        }
    }

    #[test]
    fn merge_order_does_not_matter(left in puts(), right in puts()) {
        let mut forward = build(&left);
        forward.merge(&build(&right));
        let mut backward = build(&right);
        backward.merge(&build(&left));

        for point in -2..42 {
            prop_assert_eq!(forward.get(&point).results(), backward.get(&point).results());
        }
        prop_assert!(forward.is_disjoint() && backward.is_disjoint());
    }

    #[test]
    fn repeating_puts_is_idempotent(puts in puts()) {
        let once = build(&puts);
        let mut twice = build(&puts);
        for (range, value) in &puts {
            twice.put(range.clone(), ResultStructure::single(*value));
        }

        for point in -2..42 {
            prop_assert_eq!(once.get(&point).results(), twice.get(&point).results());
        }
    }

    #[test]
    fn copies_ignore_later_puts(puts in puts(), extra in interval()) {
        let mut level = build(&puts);
        let snapshot = level.copy();
        level.put(extra, ResultStructure::single(99));

        prop_assert!(!snapshot.results().contains(&99));
        for point in -2..42 {
            prop_assert_eq!(snapshot.get(&point).results(), naive(&puts, point));
        }
    }
}
