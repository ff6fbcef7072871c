//! # Multi-level indexed lookup tables
//!
//! Compound-key lookup tables whose columns mix exact keys, single-bound
//! ranges and explicit intervals, organized as one nested index level per
//! column.
//!
//! ## Structure
//!
//! 1. **Levels**: [`KeyStructure`] (exact match), [`RangeStructure`]
//!    (floor/ceiling on one bound), [`TwoColumnRangeStructure`] (explicit
//!    intervals, kept pairwise disjoint by splitting overlaps)
//! 2. **Leaves**: [`ResultStructure`] holds payloads, [`EmptySearchStructure`]
//!    stands for "no match"
//! 3. **Merging**: any level or leaf merges with another of the same shape by
//!    union, never dropping data
//!
//! Build once (single writer), then query from any number of readers.
//!
//! ## Usage Example
//!
//! ```
//! use lookup_index::{Level, RangeStructure, RangeType, ResultStructure, SearchStructure};
//!
//! let mut tiers = RangeStructure::new(RangeType::LowerBoundEqual);
//! tiers.put(10, ResultStructure::single("bronze"));
//! tiers.put(25, ResultStructure::single("silver"));
//!
//! assert!(tiers.get(&17).results().contains("bronze"));
//! assert!(tiers.get(&9).results().is_empty());
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod structure; // Node contracts, leaves, lookup views
pub mod key;       // Exact-match level
pub mod range;     // Single-bound range level
pub mod interval;  // Interval level with overlap splitting
pub mod table;     // Schema-driven loader/query surface

// Re-exports for convenience
pub use structure::{EmptySearchStructure, Level, Lookup, Mergeable, ResultStructure, SearchStructure};
pub use key::KeyStructure;
pub use range::{RangeStructure, RangeType};
pub use interval::{LowerBound, TwoColumnRange, TwoColumnRangeStructure, UpperBound};
pub use table::{ColumnKind, ColumnSpec, IndexSchema, RowKey, TableIndex, Value, ValueType};

use thiserror::Error;

/// Errors raised while configuring or feeding an index.
///
/// Lookups that match nothing are not errors; they yield empty result sets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Schema or range policy could not be built.
    #[error("invalid index configuration: {0}")]
    InvalidConfiguration(String),

    /// A key does not have the type its column was declared with.
    #[error("column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Zero-based column position.
        column: usize,
        /// Declared column type.
        expected: String,
        /// Type of the offending key.
        found: String,
    },

    /// Interval bounds that contain no point.
    #[error("interval contains no point")]
    EmptyInterval,

    /// A cell could not be parsed for its column.
    #[error("column {column}: invalid value '{value}': {reason}")]
    InvalidValue {
        /// Zero-based column position.
        column: usize,
        /// Raw cell text.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// Row or query does not have one key per column.
    #[error("expected {expected} keys, found {found}")]
    ArityMismatch {
        /// Number of columns in the schema.
        expected: usize,
        /// Number of keys supplied.
        found: usize,
    },

    /// Indexes with different schemas cannot be merged.
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch {
        /// Schema of the receiving index.
        expected: String,
        /// Schema of the merged-in index.
        found: String,
    },
}
