//! Exact-match nesting level

use std::collections::{hash_map, HashMap, HashSet};
use std::hash::Hash;

use crate::structure::{collect_values, merge_entries, BackingMap, Level, Mergeable, SearchStructure};

/// Nesting level keyed by exact value equality.
///
/// Backed by a hash map; at most one nested structure per distinct key.
#[derive(Debug, Clone)]
pub struct KeyStructure<K, V> {
    map: HashMap<K, V>,
}

impl<K, V> KeyStructure<K, V>
where
    K: Clone + Eq + Hash,
    V: SearchStructure + Mergeable,
{
    /// Create an empty level.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Level holding a single mapping; the usual way to build one row's path.
    pub fn single(key: K, value: V) -> Self {
        let mut level = Self::new();
        level.put(key, value);
        level
    }

    /// Map `key` to `value`, merging into an existing mapping for `key`.
    pub fn put(&mut self, key: K, value: V) {
        self.map.merge_or_insert(key, value);
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether nothing has been put yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Stored mappings in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.map.iter()
    }
}

impl<K, V> Default for KeyStructure<K, V>
where
    K: Clone + Eq + Hash,
    V: SearchStructure + Mergeable,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SearchStructure for KeyStructure<K, V>
where
    V: SearchStructure,
{
    type Item = V::Item;

    fn collect_into(&self, out: &mut HashSet<V::Item>) {
        collect_values(self.map.values(), out);
    }
}

impl<K, V> Mergeable for KeyStructure<K, V>
where
    K: Clone + Eq + Hash,
    V: SearchStructure + Mergeable,
{
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
        }
    }
}

impl<K, V> Level for KeyStructure<K, V>
where
    K: Clone + Eq + Hash,
    V: SearchStructure + Mergeable,
{
    type Key = K;
    type Value = V;

    fn find(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }
}
