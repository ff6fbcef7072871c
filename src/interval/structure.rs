use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap, HashSet};
use std::ops::Bound;

use tracing::trace;

use super::{LowerBound, TwoColumnRange, UpperBound};
use crate::structure::{collect_values, BackingMap, Level, Mergeable, SearchStructure};
use crate::IndexError;

/// Nesting level keyed by explicit, pairwise non-overlapping intervals.
///
/// `put` keeps the intervals disjoint by splitting overlaps: the shared part
/// of two intervals carries the union of both values, the parts covered by
/// only one of them keep that one's value.
#[derive(Debug, Clone)]
pub struct TwoColumnRangeStructure<K, V> {
    map: BTreeMap<TwoColumnRange<K>, V>,
}

/// Pieces produced by splitting two overlapping intervals.
struct Split<K, V> {
    lower: Option<(TwoColumnRange<K>, V)>,
    middle: (TwoColumnRange<K>, V),
    upper: Option<(TwoColumnRange<K>, V)>,
}

impl<K, V> TwoColumnRangeStructure<K, V>
where
    K: Clone + Ord,
    V: SearchStructure + Mergeable,
{
    /// Create an empty level.
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Level holding a single interval.
    pub fn single(range: TwoColumnRange<K>, value: V) -> Self {
        let mut level = Self::new();
        level.put(range, value);
        level
    }

    /// Map every point of `range` to `value`.
    ///
    /// Points already covered by stored intervals end up with the union of
    /// the stored value and `value`.
    pub fn put(&mut self, range: TwoColumnRange<K>, value: V) {
        let mut pending = Some((range, value));

        while let Some((range, value)) = pending.take() {
            let Some(existing) = self.take_overlapping(&range) else {
                self.map.merge_or_insert(range, value);
                break;
            };

            let Split {
                lower,
                middle,
                upper,
            } = split(existing, (range, value));

            if let Some((range, value)) = lower {
                self.map.merge_or_insert(range, value);
            }
            self.map.merge_or_insert(middle.0, middle.1);

            // The upper remainder may run into the next stored interval.
            pending = upper;
            trace!(
                stored = self.map.len(),
                remainder = pending.is_some(),
                "split overlapping interval"
            );
        }

        debug_assert!(self.is_disjoint(), "stored intervals overlap after put");
    }

    /// Put with the bounds spelled out; `None` means infinity.
    pub fn put_bounds(
        &mut self,
        lower: Option<K>,
        upper: Option<K>,
        lower_inclusive: bool,
        upper_inclusive: bool,
        value: V,
    ) -> Result<(), IndexError> {
        let range = TwoColumnRange::new(lower, upper, lower_inclusive, upper_inclusive)?;
        self.put(range, value);
        Ok(())
    }

    /// Number of stored (disjoint) intervals.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether nothing has been put yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Stored intervals with their values, ordered by lower bound.
    pub fn iter(&self) -> btree_map::Iter<'_, TwoColumnRange<K>, V> {
        self.map.iter()
    }

    /// Stored intervals, ordered by lower bound.
    pub fn ranges(&self) -> btree_map::Keys<'_, TwoColumnRange<K>, V> {
        self.map.keys()
    }

    /// Whether no two stored intervals share a point.
    pub fn is_disjoint(&self) -> bool {
        self.map
            .keys()
            .zip(self.map.keys().skip(1))
            .all(|(left, right)| !left.overlaps(right))
    }

    /// Remove and return a stored interval overlapping `range`, if any.
    ///
    /// Only the floor (last interval starting at or before `range`) and the
    /// ceiling (first interval starting after it) can be the leftmost overlap.
    fn take_overlapping(&mut self, range: &TwoColumnRange<K>) -> Option<(TwoColumnRange<K>, V)> {
        let probe = start_probe(range.lower().clone());

        let floor = self
            .map
            .range::<TwoColumnRange<K>, _>(..=&probe)
            .next_back()
            .map(|(stored, _)| stored)
            .filter(|stored| stored.overlaps(range));
        let key = match floor {
            Some(stored) => stored.clone(),
            None => self
                .map
                .range::<TwoColumnRange<K>, _>((Bound::Excluded(&probe), Bound::Unbounded))
                .next()
                .map(|(stored, _)| stored)
                .filter(|stored| stored.overlaps(range))?
                .clone(),
        };

        self.map.remove_entry(&key)
    }
}

impl<K, V> Default for TwoColumnRangeStructure<K, V>
where
    K: Clone + Ord,
    V: SearchStructure + Mergeable,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Largest possible interval starting at `lower`; every stored interval with
/// the same lower bound sorts at or before it.
fn start_probe<K>(lower: LowerBound<K>) -> TwoColumnRange<K> {
    TwoColumnRange::from_parts(lower, UpperBound::Unbounded)
}

/// Split two overlapping intervals into at most three disjoint pieces.
fn split<K, V>(existing: (TwoColumnRange<K>, V), incoming: (TwoColumnRange<K>, V)) -> Split<K, V>
where
    K: Clone + Ord,
    V: Mergeable,
{
    let ((a_range, a_value), (b_range, b_value)) = (existing, incoming);
    let (a_lower, a_upper) = a_range.into_parts();
    let (b_lower, b_upper) = b_range.into_parts();

    let mut shared = a_value.copy();
    shared.merge(&b_value);

    // The later lower bound is always bounded, so its complement exists.
    let (lower, middle_lower) = match a_lower.cmp(&b_lower) {
        Ordering::Equal => (None, a_lower),
        Ordering::Less => {
            let piece = b_lower
                .complement()
                .map(|end| (TwoColumnRange::from_parts(a_lower, end), a_value.copy()));
            (piece, b_lower)
        }
        Ordering::Greater => {
            let piece = a_lower
                .complement()
                .map(|end| (TwoColumnRange::from_parts(b_lower, end), b_value.copy()));
            (piece, a_lower)
        }
    };

    // Likewise the earlier upper bound is always bounded.
    let (upper, middle_upper) = match a_upper.cmp(&b_upper) {
        Ordering::Equal => (None, a_upper),
        Ordering::Less => {
            let piece = a_upper
                .complement()
                .map(|start| (TwoColumnRange::from_parts(start, b_upper), b_value));
            (piece, a_upper)
        }
        Ordering::Greater => {
            let piece = b_upper
                .complement()
                .map(|start| (TwoColumnRange::from_parts(start, a_upper), a_value));
            (piece, b_upper)
        }
    };

    Split {
        lower,
        middle: (TwoColumnRange::from_parts(middle_lower, middle_upper), shared),
        upper,
    }
}

impl<K, V> SearchStructure for TwoColumnRangeStructure<K, V>
where
    V: SearchStructure,
{
    type Item = V::Item;

    fn collect_into(&self, out: &mut HashSet<V::Item>) {
        collect_values(self.map.values(), out);
    }
}

impl<K, V> Mergeable for TwoColumnRangeStructure<K, V>
where
    K: Clone + Ord,
    V: SearchStructure + Mergeable,
{
    /// Put every interval of `other`, splitting overlaps as `put` does.
    fn merge(&mut self, other: &Self) {
        for (range, value) in &other.map {
            self.put(range.clone(), value.copy());
        }
    }

    fn copy(&self) -> Self {
        Self {
            map: self
                .map
                .iter()
                .map(|(range, value)| (range.clone(), value.copy()))
                .collect(),
        }
    }
}

impl<K, V> Level for TwoColumnRangeStructure<K, V>
where
    K: Clone + Ord,
    V: SearchStructure + Mergeable,
{
    type Key = K;
    type Value = V;

    /// Floor interval by lower bound, accepted only if it reaches `key`.
    fn find(&self, key: &K) -> Option<&V> {
        let probe = start_probe(LowerBound::Inclusive(key.clone()));
        self.map
            .range::<TwoColumnRange<K>, _>(..=&probe)
            .next_back()
            .filter(|(stored, _)| stored.upper().admits(key))
            .map(|(_, value)| value)
    }
}
