use std::collections::HashSet;
use std::hash::Hash;

use super::schema::{ColumnKind, ColumnSpec, RowKey};
use super::value::Value;
use crate::interval::TwoColumnRangeStructure;
use crate::key::KeyStructure;
use crate::range::RangeStructure;
use crate::structure::{Level, Mergeable, ResultStructure, SearchStructure};
use crate::IndexError;

/// Tree node whose level kind is picked at runtime from the schema.
#[derive(Debug, Clone)]
pub(crate) enum Node<R: Eq + Hash> {
    Exact(KeyStructure<Value, Node<R>>),
    Range(RangeStructure<Value, Node<R>>),
    Interval(TwoColumnRangeStructure<Value, Node<R>>),
    Leaf(ResultStructure<R>),
}

impl<R: Clone + Eq + Hash> Node<R> {
    /// Empty level for `spec`.
    pub(crate) fn level(spec: &ColumnSpec) -> Self {
        match spec.kind {
            ColumnKind::Exact => Node::Exact(KeyStructure::new()),
            ColumnKind::Range(range_type) => Node::Range(RangeStructure::new(range_type)),
            ColumnKind::Interval => Node::Interval(TwoColumnRangeStructure::new()),
        }
    }

    /// Leaf holding one payload.
    pub(crate) fn leaf(payload: R) -> Self {
        Node::Leaf(ResultStructure::single(payload))
    }

    /// Put `child` under `key` at this level.
    pub(crate) fn put(&mut self, key: RowKey, child: Self) -> Result<(), IndexError> {
        match (self, key) {
            (Node::Exact(level), RowKey::Point(value)) => level.put(value, child),
            (Node::Range(level), RowKey::Point(value)) => level.put(value, child),
            (Node::Interval(level), RowKey::Interval(range)) => level.put(range, child),
            (node, key) => {
                return Err(IndexError::TypeMismatch {
                    column: 0,
                    expected: node.kind_name().to_string(),
                    found: format!("{key:?}"),
                })
            }
        }
        Ok(())
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Node::Exact(_) => "exact",
            Node::Range(_) => "range",
            Node::Interval(_) => "interval",
            Node::Leaf(_) => "leaf",
        }
    }
}

impl<R: Clone + Eq + Hash> SearchStructure for Node<R> {
    type Item = R;

    fn collect_into(&self, out: &mut HashSet<R>) {
        match self {
            Node::Exact(level) => level.collect_into(out),
            Node::Range(level) => level.collect_into(out),
            Node::Interval(level) => level.collect_into(out),
            Node::Leaf(leaf) => leaf.collect_into(out),
        }
    }
}

impl<R: Clone + Eq + Hash> Mergeable for Node<R> {
    fn merge(&mut self, other: &Self) {
        match (self, other) {
            (Node::Exact(level), Node::Exact(other)) => level.merge(other),
            (Node::Range(level), Node::Range(other)) => level.merge(other),
            (Node::Interval(level), Node::Interval(other)) => level.merge(other),
            (Node::Leaf(leaf), Node::Leaf(other)) => leaf.merge(other),
            (node, other) => unreachable!(
                "nodes built from one schema share a shape ({} vs {})",
                node.kind_name(),
                other.kind_name()
            ),
        }
    }

    fn copy(&self) -> Self {
        match self {
            Node::Exact(level) => Node::Exact(level.copy()),
            Node::Range(level) => Node::Range(level.copy()),
            Node::Interval(level) => Node::Interval(level.copy()),
            Node::Leaf(leaf) => Node::Leaf(leaf.copy()),
        }
    }
}

impl<R: Clone + Eq + Hash> Level for Node<R> {
    type Key = Value;
    type Value = Node<R>;

    fn find(&self, key: &Value) -> Option<&Node<R>> {
        match self {
            Node::Exact(level) => level.find(key),
            Node::Range(level) => level.find(key),
            Node::Interval(level) => level.find(key),
            Node::Leaf(_) => None,
        }
    }
}
