use std::cmp::Ordering;

/// Lower end of an interval.
///
/// Ordered by where the interval starts: `Unbounded` first, and for equal
/// keys an inclusive bound starts before an exclusive one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LowerBound<K> {
    /// Negative infinity.
    Unbounded,
    /// Starts at the key, key included.
    Inclusive(K),
    /// Starts just after the key.
    Exclusive(K),
}

/// Upper end of an interval.
///
/// Ordered by where the interval ends: for equal keys an exclusive bound ends
/// before an inclusive one, and `Unbounded` is last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpperBound<K> {
    /// Ends at the key, key included.
    Inclusive(K),
    /// Ends just before the key.
    Exclusive(K),
    /// Positive infinity.
    Unbounded,
}

impl<K> LowerBound<K> {
    /// Build from an optional key and an inclusivity flag.
    pub fn new(key: Option<K>, inclusive: bool) -> Self {
        match key {
            None => LowerBound::Unbounded,
            Some(key) if inclusive => LowerBound::Inclusive(key),
            Some(key) => LowerBound::Exclusive(key),
        }
    }

    /// The bounding key, `None` when unbounded.
    pub fn key(&self) -> Option<&K> {
        match self {
            LowerBound::Unbounded => None,
            LowerBound::Inclusive(key) | LowerBound::Exclusive(key) => Some(key),
        }
    }

    /// Whether the bounding key itself belongs to the interval.
    pub fn is_inclusive(&self) -> bool {
        matches!(self, LowerBound::Inclusive(_))
    }
}

impl<K: Ord> LowerBound<K> {
    /// Whether `point` lies at or above this bound.
    pub fn admits(&self, point: &K) -> bool {
        match self {
            LowerBound::Unbounded => true,
            LowerBound::Inclusive(key) => key <= point,
            LowerBound::Exclusive(key) => key < point,
        }
    }

    /// Whether some point satisfies both this bound and `upper`.
    pub(crate) fn reaches(&self, upper: &UpperBound<K>) -> bool {
        match (self.key(), upper.key()) {
            (None, _) | (_, None) => true,
            (Some(low), Some(high)) => match low.cmp(high) {
                Ordering::Less => true,
                Ordering::Equal => self.is_inclusive() && upper.is_inclusive(),
                Ordering::Greater => false,
            },
        }
    }
}

impl<K: Clone> LowerBound<K> {
    /// Upper bound ending exactly where this lower bound starts, so the two
    /// split the line without sharing or dropping a point.
    ///
    /// `Unbounded` has nothing below it; callers only split at bounded keys.
    pub(crate) fn complement(&self) -> Option<UpperBound<K>> {
        match self {
            LowerBound::Unbounded => None,
            LowerBound::Inclusive(key) => Some(UpperBound::Exclusive(key.clone())),
            LowerBound::Exclusive(key) => Some(UpperBound::Inclusive(key.clone())),
        }
    }
}

impl<K> UpperBound<K> {
    /// Build from an optional key and an inclusivity flag.
    pub fn new(key: Option<K>, inclusive: bool) -> Self {
        match key {
            None => UpperBound::Unbounded,
            Some(key) if inclusive => UpperBound::Inclusive(key),
            Some(key) => UpperBound::Exclusive(key),
        }
    }

    /// The bounding key, `None` when unbounded.
    pub fn key(&self) -> Option<&K> {
        match self {
            UpperBound::Unbounded => None,
            UpperBound::Inclusive(key) | UpperBound::Exclusive(key) => Some(key),
        }
    }

    /// Whether the bounding key itself belongs to the interval.
    pub fn is_inclusive(&self) -> bool {
        matches!(self, UpperBound::Inclusive(_))
    }
}

impl<K: Ord> UpperBound<K> {
    /// Whether `point` lies at or below this bound.
    pub fn admits(&self, point: &K) -> bool {
        match self {
            UpperBound::Unbounded => true,
            UpperBound::Inclusive(key) => point <= key,
            UpperBound::Exclusive(key) => point < key,
        }
    }
}

impl<K: Clone> UpperBound<K> {
    /// Lower bound starting right after this upper bound ends.
    pub(crate) fn complement(&self) -> Option<LowerBound<K>> {
        match self {
            UpperBound::Unbounded => None,
            UpperBound::Inclusive(key) => Some(LowerBound::Exclusive(key.clone())),
            UpperBound::Exclusive(key) => Some(LowerBound::Inclusive(key.clone())),
        }
    }
}

impl<K: Ord> Ord for LowerBound<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LowerBound::Unbounded, LowerBound::Unbounded) => Ordering::Equal,
            (LowerBound::Unbounded, _) => Ordering::Less,
            (_, LowerBound::Unbounded) => Ordering::Greater,
            (left, right) => left
                .key()
                .cmp(&right.key())
                .then_with(|| right.is_inclusive().cmp(&left.is_inclusive())),
        }
    }
}

impl<K: Ord> PartialOrd for LowerBound<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for UpperBound<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (UpperBound::Unbounded, UpperBound::Unbounded) => Ordering::Equal,
            (UpperBound::Unbounded, _) => Ordering::Greater,
            (_, UpperBound::Unbounded) => Ordering::Less,
            (left, right) => left
                .key()
                .cmp(&right.key())
                .then_with(|| left.is_inclusive().cmp(&right.is_inclusive())),
        }
    }
}

impl<K: Ord> PartialOrd for UpperBound<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bounds_order_by_start() {
        let mut bounds = vec![
            LowerBound::Exclusive(5),
            LowerBound::Inclusive(7),
            LowerBound::Unbounded,
            LowerBound::Inclusive(5),
        ];
        bounds.sort();
        assert_eq!(
            bounds,
            vec![
                LowerBound::Unbounded,
                LowerBound::Inclusive(5),
                LowerBound::Exclusive(5),
                LowerBound::Inclusive(7),
            ]
        );
    }

    #[test]
    fn upper_bounds_order_by_end() {
        let mut bounds = vec![
            UpperBound::Unbounded,
            UpperBound::Inclusive(5),
            UpperBound::Exclusive(5),
            UpperBound::Inclusive(2),
        ];
        bounds.sort();
        assert_eq!(
            bounds,
            vec![
                UpperBound::Inclusive(2),
                UpperBound::Exclusive(5),
                UpperBound::Inclusive(5),
                UpperBound::Unbounded,
            ]
        );
    }

    #[test]
    fn complements_partition_the_boundary_point() {
        let lower = LowerBound::Inclusive(10);
        let below = lower.complement().expect("bounded");
        assert!(lower.admits(&10));
        assert!(!below.admits(&10));

        let upper = UpperBound::Inclusive(10);
        let above = upper.complement().expect("bounded");
        assert!(upper.admits(&10));
        assert!(!above.admits(&10));
        assert!(above.admits(&11));
    }

    #[test]
    fn reaches_respects_inclusivity() {
        assert!(LowerBound::Inclusive(3).reaches(&UpperBound::Inclusive(3)));
        assert!(!LowerBound::Exclusive(3).reaches(&UpperBound::Inclusive(3)));
        assert!(!LowerBound::Inclusive(3).reaches(&UpperBound::Exclusive(3)));
        assert!(!LowerBound::Inclusive(4).reaches(&UpperBound::Inclusive(3)));
        assert!(LowerBound::<i32>::Unbounded.reaches(&UpperBound::Unbounded));
    }
}
