//! Core contracts of the lookup tree
//!
//! A lookup tree is a stack of nesting levels (one per table column) that ends
//! in result leaves. Every node can flatten itself to the set of payloads it
//! reaches; every level can descend by one key.
//!
//! Lookups never fail: a missing key (or a `None` key) descends into
//! [`EmptySearchStructure`], and every further descent stays there.

mod empty;
mod map;
mod result;

pub use empty::EmptySearchStructure;
pub use result::ResultStructure;

pub(crate) use map::{collect_values, merge_entries, BackingMap};

use std::collections::HashSet;
use std::hash::Hash;

/// A node of the lookup tree.
pub trait SearchStructure {
    /// Payload type stored at the leaves.
    type Item: Clone + Eq + Hash;

    /// Add every payload reachable from this node to `out`.
    fn collect_into(&self, out: &mut HashSet<Self::Item>);

    /// Set of payloads reachable from this node.
    fn results(&self) -> HashSet<Self::Item> {
        let mut out = HashSet::new();
        self.collect_into(&mut out);
        out
    }
}

/// Union-merge and deep-copy capability shared by levels and leaves.
///
/// `merge` is additive: nothing already stored in `self` is dropped, and
/// merging something that is already fully contained changes nothing.
pub trait Mergeable: Sized {
    /// Merge `other` into `self` in place.
    fn merge(&mut self, other: &Self);

    /// Independent deep copy; later puts on either side never affect the other.
    fn copy(&self) -> Self;
}

/// One nesting level keyed by a single column.
pub trait Level: SearchStructure {
    /// Lookup key accepted by this level.
    type Key;
    /// Nested structure stored under each key.
    type Value: SearchStructure<Item = Self::Item> + Mergeable;

    /// Resolve `key` to the stored nested structure, if any.
    fn find(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Descend by one key. `None` and unknown keys both yield an empty lookup.
    fn get<'q>(&self, key: impl Into<Option<&'q Self::Key>>) -> Lookup<'_, Self::Value>
    where
        Self::Key: 'q,
    {
        key.into()
            .and_then(|key| self.find(key))
            .map_or_else(Lookup::empty, Lookup::Found)
    }
}

/// Outcome of one descent: a stored nested structure or the empty sentinel.
#[derive(Debug)]
pub enum Lookup<'a, S: SearchStructure> {
    /// Key resolved to a stored structure.
    Found(&'a S),
    /// Nothing matched at this level or above.
    Empty(EmptySearchStructure<S::Item>),
}

impl<'a, S: SearchStructure> Lookup<'a, S> {
    /// Lookup that matched nothing.
    pub fn empty() -> Self {
        Lookup::Empty(EmptySearchStructure::new())
    }

    /// Descend one more level. An empty lookup stays empty.
    pub fn get<'q>(self, key: impl Into<Option<&'q S::Key>>) -> Lookup<'a, S::Value>
    where
        S: Level,
        S::Key: 'q,
    {
        match self {
            Lookup::Found(structure) => structure.get(key),
            Lookup::Empty(_) => Lookup::empty(),
        }
    }

    /// The structure that was found, if any.
    pub fn found(&self) -> Option<&'a S> {
        match self {
            Lookup::Found(structure) => Some(structure),
            Lookup::Empty(_) => None,
        }
    }

    /// Whether this lookup hit the empty sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Lookup::Empty(_))
    }
}

impl<S: SearchStructure> Clone for Lookup<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: SearchStructure> Copy for Lookup<'_, S> {}

impl<S: SearchStructure> SearchStructure for Lookup<'_, S> {
    type Item = S::Item;

    fn collect_into(&self, out: &mut HashSet<Self::Item>) {
        if let Lookup::Found(structure) = self {
            structure.collect_into(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyStructure;

    #[test]
    fn lookup_chain_stays_empty_after_miss() {
        let mut inner = KeyStructure::new();
        inner.put("b", ResultStructure::single(1u32));
        let mut root = KeyStructure::new();
        root.put("a", inner);

        assert_eq!(root.get(&"a").get(&"b").results(), HashSet::from([1]));
        assert!(root.get(&"missing").is_empty());
        assert!(root.get(&"missing").get(&"b").is_empty());
        assert!(root.get(&"missing").get(&"b").results().is_empty());
        assert!(root.get(None).get(&"b").results().is_empty());
    }

    #[test]
    fn found_exposes_nested_structure() {
        let mut root = KeyStructure::new();
        root.put(7, ResultStructure::single("x"));

        let hit = root.get(&7);
        assert_eq!(hit.found().map(|leaf| leaf.len()), Some(1));
        assert!(root.get(&8).found().is_none());
    }
}
