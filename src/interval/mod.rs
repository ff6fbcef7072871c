//! Explicit interval nesting level
//!
//! Rows carry a `[lower, upper]` interval with independent inclusivity per
//! bound. Stored intervals never overlap: a put that overlaps existing
//! intervals is split so that every point maps to exactly one stored
//! interval, whose value is the union of every put covering that point.

mod bound;
mod structure;

pub use bound::{LowerBound, UpperBound};
pub use structure::TwoColumnRangeStructure;

use std::cmp::{self, Ordering};
use std::fmt;

use crate::IndexError;

/// Non-empty interval over an ordered key domain.
///
/// Ordered first by lower bound, then by upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoColumnRange<K> {
    lower: LowerBound<K>,
    upper: UpperBound<K>,
}

impl<K: Ord> TwoColumnRange<K> {
    /// Build from optional keys and inclusivity flags; `None` means infinity.
    pub fn new(
        lower: Option<K>,
        upper: Option<K>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Result<Self, IndexError> {
        Self::from_bounds(
            LowerBound::new(lower, lower_inclusive),
            UpperBound::new(upper, upper_inclusive),
        )
    }

    /// Build from explicit bounds, rejecting intervals that contain no point.
    pub fn from_bounds(lower: LowerBound<K>, upper: UpperBound<K>) -> Result<Self, IndexError> {
        if !lower.reaches(&upper) {
            return Err(IndexError::EmptyInterval);
        }
        Ok(Self { lower, upper })
    }

    /// `[lower, upper]`, both ends included.
    pub fn closed(lower: K, upper: K) -> Result<Self, IndexError> {
        Self::new(Some(lower), Some(upper), true, true)
    }

    /// `[lower, upper)`.
    pub fn half_open(lower: K, upper: K) -> Result<Self, IndexError> {
        Self::new(Some(lower), Some(upper), true, false)
    }

    /// `[lower, +inf)`.
    pub fn at_least(lower: K) -> Self {
        Self {
            lower: LowerBound::Inclusive(lower),
            upper: UpperBound::Unbounded,
        }
    }

    /// `(-inf, upper]`.
    pub fn at_most(upper: K) -> Self {
        Self {
            lower: LowerBound::Unbounded,
            upper: UpperBound::Inclusive(upper),
        }
    }

    /// The whole key domain.
    pub fn unbounded() -> Self {
        Self {
            lower: LowerBound::Unbounded,
            upper: UpperBound::Unbounded,
        }
    }

    /// Whether `point` lies inside the interval.
    pub fn contains(&self, point: &K) -> bool {
        self.lower.admits(point) && self.upper.admits(point)
    }

    /// Whether the two intervals share at least one point.
    pub fn overlaps(&self, other: &Self) -> bool {
        let lower = cmp::max(&self.lower, &other.lower);
        let upper = cmp::min(&self.upper, &other.upper);
        lower.reaches(upper)
    }
}

impl<K> TwoColumnRange<K> {
    /// Assemble bounds already known to describe a non-empty interval.
    pub(crate) fn from_parts(lower: LowerBound<K>, upper: UpperBound<K>) -> Self {
        Self { lower, upper }
    }

    /// Lower end.
    pub fn lower(&self) -> &LowerBound<K> {
        &self.lower
    }

    /// Upper end.
    pub fn upper(&self) -> &UpperBound<K> {
        &self.upper
    }

    /// Lower key, `None` for negative infinity.
    pub fn lower_key(&self) -> Option<&K> {
        self.lower.key()
    }

    /// Upper key, `None` for positive infinity.
    pub fn upper_key(&self) -> Option<&K> {
        self.upper.key()
    }

    /// Whether the lower key belongs to the interval.
    pub fn is_lower_inclusive(&self) -> bool {
        self.lower.is_inclusive()
    }

    /// Whether the upper key belongs to the interval.
    pub fn is_upper_inclusive(&self) -> bool {
        self.upper.is_inclusive()
    }

    pub(crate) fn into_parts(self) -> (LowerBound<K>, UpperBound<K>) {
        (self.lower, self.upper)
    }
}

impl<K: Ord> Ord for TwoColumnRange<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lower
            .cmp(&other.lower)
            .then_with(|| self.upper.cmp(&other.upper))
    }
}

impl<K: Ord> PartialOrd for TwoColumnRange<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: fmt::Display> fmt::Display for TwoColumnRange<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            LowerBound::Unbounded => f.write_str("(")?,
            LowerBound::Inclusive(key) => write!(f, "[{key}")?,
            LowerBound::Exclusive(key) => write!(f, "({key}")?,
        }
        f.write_str(",")?;
        match &self.upper {
            UpperBound::Unbounded => f.write_str(")"),
            UpperBound::Inclusive(key) => write!(f, "{key}]"),
            UpperBound::Exclusive(key) => write!(f, "{key})"),
        }
    }
}
