#![allow(deprecated)]

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;

use crate::IndexError;

/// Meaning of the keys stored in a [`RangeStructure`](super::RangeStructure).
///
/// | variant            | stored key is             | lookup         |
/// |--------------------|---------------------------|----------------|
/// | `LowerBoundEqual`  | inclusive lower bound     | floor          |
/// | `UpperBoundEqual`  | inclusive upper bound     | ceiling        |
/// | `LowerBound`       | exclusive lower bound     | strictly below |
/// | `UpperBound`       | exclusive upper bound     | strictly above |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RangeType {
    /// Key is the inclusive lower bound of its range.
    LowerBoundEqual,
    /// Key is the inclusive upper bound of its range.
    UpperBoundEqual,
    /// Key is the exclusive lower bound of its range.
    ///
    /// A value put under `10` is not reachable through `get(10)`.
    #[deprecated(note = "asymmetric with put; use LowerBoundEqual")]
    LowerBound,
    /// Key is the exclusive upper bound of its range.
    ///
    /// A value put under `10` is not reachable through `get(10)`.
    #[deprecated(note = "asymmetric with put; use UpperBoundEqual")]
    UpperBound,
}

impl RangeType {
    /// Every policy, in declaration order.
    pub const ALL: [RangeType; 4] = [
        RangeType::LowerBoundEqual,
        RangeType::UpperBoundEqual,
        RangeType::LowerBound,
        RangeType::UpperBound,
    ];

    /// Stable lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            RangeType::LowerBoundEqual => "lower_bound_equal",
            RangeType::UpperBoundEqual => "upper_bound_equal",
            RangeType::LowerBound => "lower_bound",
            RangeType::UpperBound => "upper_bound",
        }
    }

    /// Resolve `key` to the stored entry whose range contains it.
    pub(crate) fn resolve<'m, K: Ord, V>(
        &self,
        map: &'m BTreeMap<K, V>,
        key: &K,
    ) -> Option<(&'m K, &'m V)> {
        match self {
            RangeType::LowerBoundEqual => map.range::<K, _>(..=key).next_back(),
            RangeType::UpperBoundEqual => map.range::<K, _>(key..).next(),
            // Floor, stepping once more downwards when the floor is the key itself.
            RangeType::LowerBound => {
                let floor = map.range::<K, _>(..=key).next_back()?;
                if floor.0 == key {
                    map.range::<K, _>(..key).next_back()
                } else {
                    Some(floor)
                }
            }
            RangeType::UpperBound => {
                let ceiling = map.range::<K, _>(key..).next()?;
                if ceiling.0 == key {
                    map.range::<K, _>((Bound::Excluded(key), Bound::Unbounded)).next()
                } else {
                    Some(ceiling)
                }
            }
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangeType {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeType::ALL
            .into_iter()
            .find(|range_type| range_type.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                IndexError::InvalidConfiguration(format!("unknown range type '{}'", s.trim()))
            })
    }
}
