use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::value::{parse_interval, Value, ValueType};
use crate::interval::TwoColumnRange;
use crate::range::RangeType;
use crate::IndexError;

/// How one column is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    /// Exact equality, see [`KeyStructure`](crate::KeyStructure).
    Exact,
    /// Single-bound range, see [`RangeStructure`](crate::RangeStructure).
    Range(RangeType),
    /// Explicit interval, see
    /// [`TwoColumnRangeStructure`](crate::TwoColumnRangeStructure).
    Interval,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Exact => f.write_str("exact"),
            ColumnKind::Range(range_type) => write!(f, "{range_type}"),
            ColumnKind::Interval => f.write_str("interval"),
        }
    }
}

impl FromStr for ColumnKind {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "key" => Ok(ColumnKind::Exact),
            "interval" | "two_column_range" => Ok(ColumnKind::Interval),
            other => other.parse::<RangeType>().map(ColumnKind::Range).map_err(|_| {
                IndexError::InvalidConfiguration(format!("unknown column kind '{other}'"))
            }),
        }
    }
}

/// Kind and cell type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSpec {
    /// Indexing strategy.
    pub kind: ColumnKind,
    /// Type of the column's keys.
    pub value_type: ValueType,
}

impl ColumnSpec {
    /// Pair a kind with a cell type.
    pub fn new(kind: ColumnKind, value_type: ValueType) -> Self {
        Self { kind, value_type }
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value_type)
    }
}

/// `kind[:type]`; the type defaults to `text` for exact columns and `int`
/// otherwise.
impl FromStr for ColumnSpec {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value_type) = match s.split_once(':') {
            Some((kind, value_type)) => (
                kind.parse::<ColumnKind>()?,
                Some(value_type.parse::<ValueType>()?),
            ),
            None => (s.parse::<ColumnKind>()?, None),
        };
        let value_type = value_type.unwrap_or(match kind {
            ColumnKind::Exact => ValueType::Text,
            ColumnKind::Range(_) | ColumnKind::Interval => ValueType::Int,
        });
        Ok(Self { kind, value_type })
    }
}

/// Lookup key of one row in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKey {
    /// Exact or single-bound key.
    Point(Value),
    /// Interval key.
    Interval(TwoColumnRange<Value>),
}

impl RowKey {
    fn describe(&self) -> String {
        match self {
            RowKey::Point(value) => value.value_type().to_string(),
            RowKey::Interval(_) => "interval".to_string(),
        }
    }
}

/// Ordered column layout of a table index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ColumnSpec>", into = "Vec<ColumnSpec>")
)]
pub struct IndexSchema {
    columns: Vec<ColumnSpec>,
}

impl IndexSchema {
    /// Validate and build a schema; at least one column is required.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, IndexError> {
        if columns.is_empty() {
            return Err(IndexError::InvalidConfiguration(
                "schema needs at least one column".to_string(),
            ));
        }
        debug!(columns = columns.len(), "built index schema");
        Ok(Self { columns })
    }

    /// Column specs in nesting order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Number of key columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Parse the key cells of one row.
    pub fn parse_row(&self, cells: &[&str]) -> Result<Vec<RowKey>, IndexError> {
        self.check_arity(cells.len())?;
        self.columns
            .iter()
            .zip(cells)
            .enumerate()
            .map(|(column, (spec, raw))| {
                let invalid = |reason: String| IndexError::InvalidValue {
                    column,
                    value: raw.to_string(),
                    reason,
                };
                match spec.kind {
                    ColumnKind::Interval => parse_interval(raw, spec.value_type)
                        .map(RowKey::Interval)
                        .map_err(invalid),
                    ColumnKind::Exact | ColumnKind::Range(_) => spec
                        .value_type
                        .parse(raw)
                        .map(RowKey::Point)
                        .map_err(invalid),
                }
            })
            .collect()
    }

    /// Parse one lookup cell per column.
    pub fn parse_query(&self, cells: &[&str]) -> Result<Vec<Value>, IndexError> {
        self.check_arity(cells.len())?;
        self.columns
            .iter()
            .zip(cells)
            .enumerate()
            .map(|(column, (spec, raw))| {
                spec.value_type
                    .parse(raw)
                    .map_err(|reason| IndexError::InvalidValue {
                        column,
                        value: raw.to_string(),
                        reason,
                    })
            })
            .collect()
    }

    /// Check that row keys fit the column kinds and types.
    pub fn check_row(&self, keys: &[RowKey]) -> Result<(), IndexError> {
        self.check_arity(keys.len())?;
        for (column, (spec, key)) in self.columns.iter().zip(keys).enumerate() {
            let fits = match (spec.kind, key) {
                (ColumnKind::Interval, RowKey::Interval(range)) => range
                    .lower_key()
                    .into_iter()
                    .chain(range.upper_key())
                    .all(|value| value.value_type() == spec.value_type),
                (ColumnKind::Exact | ColumnKind::Range(_), RowKey::Point(value)) => {
                    value.value_type() == spec.value_type
                }
                _ => false,
            };
            if !fits {
                return Err(IndexError::TypeMismatch {
                    column,
                    expected: spec.to_string(),
                    found: key.describe(),
                });
            }
        }
        Ok(())
    }

    /// Check that lookup values fit the column types. `None` always fits.
    pub fn check_query<'a, I>(&self, keys: I) -> Result<(), IndexError>
    where
        I: ExactSizeIterator<Item = Option<&'a Value>>,
    {
        self.check_arity(keys.len())?;
        for (column, (spec, key)) in self.columns.iter().zip(keys).enumerate() {
            if let Some(value) = key {
                if value.value_type() != spec.value_type {
                    return Err(IndexError::TypeMismatch {
                        column,
                        expected: spec.value_type.to_string(),
                        found: value.value_type().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_arity(&self, found: usize) -> Result<(), IndexError> {
        if found != self.columns.len() {
            return Err(IndexError::ArityMismatch {
                expected: self.columns.len(),
                found,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<ColumnSpec>> for IndexSchema {
    type Error = IndexError;

    fn try_from(columns: Vec<ColumnSpec>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<IndexSchema> for Vec<ColumnSpec> {
    fn from(schema: IndexSchema) -> Self {
        schema.columns
    }
}

impl fmt::Display for IndexSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{column}")?;
        }
        Ok(())
    }
}

/// Comma-separated column specs, e.g. `exact:text,lower_bound_equal,interval:int`.
impl FromStr for IndexSchema {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let columns = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<ColumnSpec>, _>>()?;
        Self::new(columns)
    }
}
