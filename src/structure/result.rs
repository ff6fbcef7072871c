use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::{Mergeable, SearchStructure};

/// Leaf holding the payloads of every row that ended at this path.
///
/// Values are deduplicated by equality, so putting the same payload twice is
/// observably the same as putting it once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultStructure<R: Eq + Hash> {
    values: HashSet<R>,
}

impl<R: Clone + Eq + Hash> ResultStructure<R> {
    /// Create an empty leaf.
    pub fn new() -> Self {
        Self {
            values: HashSet::new(),
        }
    }

    /// Leaf holding exactly one payload.
    pub fn single(value: R) -> Self {
        let mut leaf = Self::new();
        leaf.insert(value);
        leaf
    }

    /// Add a payload; returns `false` if it was already present.
    pub fn insert(&mut self, value: R) -> bool {
        self.values.insert(value)
    }

    /// Read-only view of the stored payloads.
    pub fn values(&self) -> &HashSet<R> {
        &self.values
    }

    /// Number of distinct payloads.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the leaf holds no payloads.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take ownership of the payload set.
    pub fn into_values(self) -> HashSet<R> {
        self.values
    }
}

impl<R: Clone + Eq + Hash> Default for ResultStructure<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone + Eq + Hash> SearchStructure for ResultStructure<R> {
    type Item = R;

    fn collect_into(&self, out: &mut HashSet<R>) {
        out.extend(self.values.iter().cloned());
    }
}

impl<R: Clone + Eq + Hash> Mergeable for ResultStructure<R> {
    fn merge(&mut self, other: &Self) {
        self.values.extend(other.values.iter().cloned());
    }

    fn copy(&self) -> Self {
        self.clone()
    }
}

impl<R: Eq + Hash> Hash for ResultStructure<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order independent: per-element digests are summed.
        let digest = self
            .values
            .iter()
            .map(|value| {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                hasher.finish()
            })
            .fold(0u64, u64::wrapping_add);
        state.write_usize(self.values.len());
        state.write_u64(digest);
    }
}

impl<R: Clone + Eq + Hash> FromIterator<R> for ResultStructure<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<R: Clone + Eq + Hash> Extend<R> for ResultStructure<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}
