//! Single-bound range nesting level
//!
//! Stored keys partition the ordered key domain into contiguous ranges. Each
//! stored key is one bound of its range; the opposite bound is the
//! neighboring stored key (or infinity at the ends). The [`RangeType`] chosen
//! at construction decides which bound a key denotes.

mod range_type;

pub use range_type::RangeType;

use std::collections::{btree_map, BTreeMap, HashSet};

use crate::structure::{collect_values, merge_entries, BackingMap, Level, Mergeable, SearchStructure};

/// Nesting level keyed by one bound of an implicit range.
#[derive(Debug, Clone)]
pub struct RangeStructure<K, V> {
    map: BTreeMap<K, V>,
    range_type: RangeType,
}

impl<K, V> RangeStructure<K, V>
where
    K: Clone + Ord,
    V: SearchStructure + Mergeable,
{
    /// Create an empty level resolving lookups with `range_type`.
    pub fn new(range_type: RangeType) -> Self {
        Self {
            map: BTreeMap::new(),
            range_type,
        }
    }

    /// Map the bound `key` to `value`, merging into an existing mapping.
    pub fn put(&mut self, key: K, value: V) {
        self.map.merge_or_insert(key, value);
    }

    /// Policy used to resolve lookups.
    pub fn range_type(&self) -> RangeType {
        self.range_type
    }

    /// Number of stored bounds.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether nothing has been put yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Stored mappings in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.map.iter()
    }
}

impl<K, V> SearchStructure for RangeStructure<K, V>
where
    V: SearchStructure,
{
    type Item = V::Item;

    fn collect_into(&self, out: &mut HashSet<V::Item>) {
        collect_values(self.map.values(), out);
    }
}

impl<K, V> Mergeable for RangeStructure<K, V>
where
    K: Clone + Ord,
    V: SearchStructure + Mergeable,
{
    /// Bulk put of `other`'s bounds. The policy of `self` is kept.
    fn merge(&mut self, other: &Self) {
        merge_entries(&mut self.map, other.map.iter());
    }

    fn copy(&self) -> Self {
        Self {
            map: self
                .map
                .iter()
                .map(|(key, value)| (key.clone(), value.copy()))
                .collect(),
            range_type: self.range_type,
        }
    }
}

impl<K, V> Level for RangeStructure<K, V>
where
    K: Clone + Ord,
    V: SearchStructure + Mergeable,
{
    type Key = K;
    type Value = V;

    fn find(&self, key: &K) -> Option<&V> {
        self.range_type.resolve(&self.map, key).map(|(_, value)| value)
    }
}
