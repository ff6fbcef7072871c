//! Shared behavior of the map-backed levels
//!
//! Every level stores `key -> nested structure` and never replaces a mapping:
//! a second value for an existing key is merged into the first.

use std::collections::{btree_map, hash_map, BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use super::{Mergeable, SearchStructure};

/// Map that can merge-or-insert a value under a key.
pub(crate) trait BackingMap {
    type Key;
    type Value: Mergeable;

    /// Merge `value` into the existing mapping for `key`, or insert it.
    fn merge_or_insert(&mut self, key: Self::Key, value: Self::Value);
}

impl<K: Eq + Hash, V: Mergeable> BackingMap for HashMap<K, V> {
    type Key = K;
    type Value = V;

    fn merge_or_insert(&mut self, key: K, value: V) {
        match self.entry(key) {
            hash_map::Entry::Occupied(mut slot) => slot.get_mut().merge(&value),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }
}

impl<K: Ord, V: Mergeable> BackingMap for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn merge_or_insert(&mut self, key: K, value: V) {
        match self.entry(key) {
            btree_map::Entry::Occupied(mut slot) => slot.get_mut().merge(&value),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }
}

/// Bulk put: copy every entry of `from` into `into`.
pub(crate) fn merge_entries<'a, M, I>(into: &mut M, from: I)
where
    M: BackingMap,
    M::Key: Clone + 'a,
    M::Value: 'a,
    I: IntoIterator<Item = (&'a M::Key, &'a M::Value)>,
{
    for (key, value) in from {
        into.merge_or_insert(key.clone(), value.copy());
    }
}

/// Union of the results of every nested structure.
pub(crate) fn collect_values<'a, V, I>(values: I, out: &mut HashSet<V::Item>)
where
    V: SearchStructure + 'a,
    I: IntoIterator<Item = &'a V>,
{
    for value in values {
        value.collect_into(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResultStructure;

    #[test]
    fn merge_or_insert_accumulates() {
        let mut map = HashMap::new();
        map.merge_or_insert("k", ResultStructure::single(1));
        map.merge_or_insert("k", ResultStructure::single(2));
        map.merge_or_insert("j", ResultStructure::single(3));

        assert_eq!(map.len(), 2);
        assert_eq!(map["k"].values(), &HashSet::from([1, 2]));
    }

    #[test]
    fn merge_entries_copies_values() {
        let mut source = BTreeMap::new();
        source.merge_or_insert(1, ResultStructure::single("a"));

        let mut target = BTreeMap::new();
        target.merge_or_insert(1, ResultStructure::single("b"));
        merge_entries(&mut target, source.iter());

        let mut out = HashSet::new();
        collect_values(target.values(), &mut out);
        assert_eq!(out, HashSet::from(["a", "b"]));
        assert_eq!(source[&1].len(), 1);
    }
}
