//! Schema-driven table index
//!
//! The typed levels fix the nesting shape at compile time. A [`TableIndex`]
//! picks it at runtime from an [`IndexSchema`], which is what a table loader
//! needs: rows arrive as one key per column plus a payload, and queries as one
//! lookup value per column.

mod node;
mod schema;
mod value;

pub use schema::{ColumnKind, ColumnSpec, IndexSchema, RowKey};
pub use value::{Value, ValueType};

use std::collections::HashSet;
use std::hash::Hash;

use tracing::debug;

use crate::structure::{Lookup, Mergeable, SearchStructure};
use crate::IndexError;
use node::Node;

/// Multi-column lookup table built row by row.
#[derive(Debug, Clone)]
pub struct TableIndex<R: Eq + Hash = String> {
    schema: IndexSchema,
    root: Node<R>,
    rows: usize,
}

impl<R: Clone + Eq + Hash> TableIndex<R> {
    /// Empty index shaped by `schema`.
    pub fn new(schema: IndexSchema) -> Self {
        let root = Node::level(&schema.columns()[0]);
        Self {
            schema,
            root,
            rows: 0,
        }
    }

    /// Schema the index was built with.
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Number of rows inserted (including rows merged in from other indexes).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Insert one row: a key per column, then the payload.
    ///
    /// The row's path is built bottom-up and put at the root, so rows sharing
    /// keys accumulate payloads instead of replacing each other.
    pub fn insert_row(&mut self, keys: Vec<RowKey>, payload: R) -> Result<(), IndexError> {
        self.schema.check_row(&keys)?;

        let mut keys = keys.into_iter();
        let Some(first) = keys.next() else {
            return Err(IndexError::ArityMismatch {
                expected: self.schema.len(),
                found: 0,
            });
        };

        let mut child = Node::leaf(payload);
        for (spec, key) in self.schema.columns()[1..].iter().zip(keys).rev() {
            let mut level = Node::level(spec);
            level.put(key, child)?;
            child = level;
        }
        self.root.put(first, child)?;

        self.rows += 1;
        Ok(())
    }

    /// Parse the key cells of a row and insert it.
    pub fn insert_cells(&mut self, cells: &[&str], payload: R) -> Result<(), IndexError> {
        let keys = self.schema.parse_row(cells)?;
        self.insert_row(keys, payload)
    }

    /// Payloads matching one lookup value per column.
    ///
    /// A value of the wrong type is an error; a value that matches nothing is
    /// just an empty set.
    pub fn query(&self, keys: &[Value]) -> Result<HashSet<R>, IndexError> {
        self.schema.check_query(keys.iter().map(Some))?;
        let lookup = keys
            .iter()
            .fold(Lookup::Found(&self.root), |lookup, key| lookup.get(key));
        Ok(lookup.results())
    }

    /// Like [`query`](Self::query), with absent keys matching nothing.
    pub fn query_optional(&self, keys: &[Option<Value>]) -> Result<HashSet<R>, IndexError> {
        self.schema.check_query(keys.iter().map(Option::as_ref))?;
        let lookup = keys
            .iter()
            .fold(Lookup::Found(&self.root), |lookup, key| lookup.get(key.as_ref()));
        Ok(lookup.results())
    }

    /// Parse lookup cells and query.
    pub fn query_cells(&self, cells: &[&str]) -> Result<HashSet<R>, IndexError> {
        let keys = self.schema.parse_query(cells)?;
        self.query(&keys)
    }

    /// Merge an independently built index with the same schema.
    pub fn merge(&mut self, other: &Self) -> Result<(), IndexError> {
        if self.schema != other.schema {
            return Err(IndexError::SchemaMismatch {
                expected: self.schema.to_string(),
                found: other.schema.to_string(),
            });
        }
        self.root.merge(&other.root);
        self.rows += other.rows;
        debug!(rows = self.rows, "merged table index");
        Ok(())
    }

    /// Independent deep copy.
    pub fn copy(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            root: self.root.copy(),
            rows: self.rows,
        }
    }
}

impl<R: Clone + Eq + Hash> SearchStructure for TableIndex<R> {
    type Item = R;

    fn collect_into(&self, out: &mut HashSet<R>) {
        self.root.collect_into(out);
    }
}
