use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::SearchStructure;

/// Terminal "no match" sentinel.
///
/// Zero-sized and stateless; descending from it yields itself and it reaches
/// no payloads.
pub struct EmptySearchStructure<R> {
    _item: PhantomData<fn() -> R>,
}

impl<R> EmptySearchStructure<R> {
    /// The sentinel.
    pub const fn new() -> Self {
        Self { _item: PhantomData }
    }

    /// Descending from nothing is still nothing.
    pub fn get<K: ?Sized>(&self, _key: Option<&K>) -> &Self {
        self
    }
}

impl<R> Default for EmptySearchStructure<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for EmptySearchStructure<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for EmptySearchStructure<R> {}

impl<R> fmt::Debug for EmptySearchStructure<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EmptySearchStructure")
    }
}

impl<R: Clone + Eq + Hash> SearchStructure for EmptySearchStructure<R> {
    type Item = R;

    fn collect_into(&self, _out: &mut HashSet<R>) {}
}
