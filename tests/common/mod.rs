#![allow(dead_code)]

use std::collections::HashSet;

use lookup_index::{
    KeyStructure, Level, RangeStructure, RangeType, ResultStructure, SearchStructure,
    TwoColumnRange, TwoColumnRangeStructure,
};

pub type Leaf = ResultStructure<&'static str>;
pub type Intervals = TwoColumnRangeStructure<i64, Leaf>;
pub type Tiers = RangeStructure<i64, Leaf>;

/// Three levels: region (exact) -> amount tier (range) -> validity (interval).
pub type Tariff = KeyStructure<&'static str, RangeStructure<i64, Intervals>>;

pub fn leaf(value: &'static str) -> Leaf {
    ResultStructure::single(value)
}

pub fn closed(lower: i64, upper: i64) -> TwoColumnRange<i64> {
    TwoColumnRange::closed(lower, upper).expect("non-empty interval")
}

pub fn set(values: &[&'static str]) -> HashSet<&'static str> {
    values.iter().copied().collect()
}

pub fn intervals_at(level: &Intervals, key: i64) -> HashSet<&'static str> {
    level.get(&key).results()
}

/// One row's path through a [`Tariff`].
pub fn tariff_row(
    region: &'static str,
    tier: i64,
    validity: TwoColumnRange<i64>,
    payload: &'static str,
) -> Tariff {
    let mut tiers = RangeStructure::new(RangeType::LowerBoundEqual);
    tiers.put(tier, TwoColumnRangeStructure::single(validity, leaf(payload)));
    KeyStructure::single(region, tiers)
}
