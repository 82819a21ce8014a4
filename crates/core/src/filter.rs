//! Boolean filter expressions over field paths
//!
//! A [`QueryFilter`] is the compiled form of a keyword query against one
//! entity type. The compiler only ever produces an AND of ORs of
//! [`FieldMatch`] leaves, but the tree is general so that data-access
//! implementations can evaluate or translate it without caring about shape.

use crate::field_path::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOp {
    /// Case-insensitive substring match
    ContainsCi,
}

impl MatchOp {
    /// Apply the operator to one candidate value
    pub fn matches(&self, candidate: &str, needle: &str) -> bool {
        match self {
            MatchOp::ContainsCi => candidate.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

/// A single `(field, operator, value)` condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Attribute the condition applies to
    pub path: FieldPath,
    /// Comparison operator
    pub op: MatchOp,
    /// Value compared against
    pub value: String,
}

impl FieldMatch {
    /// Case-insensitive substring leaf
    pub fn contains_ci(path: FieldPath, value: impl Into<String>) -> Self {
        FieldMatch {
            path,
            op: MatchOp::ContainsCi,
            value: value.into(),
        }
    }
}

/// Boolean expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFilter {
    /// Single condition
    Match(FieldMatch),
    /// True if any child is true
    Or(Vec<QueryFilter>),
    /// True if every child is true
    And(Vec<QueryFilter>),
}

impl QueryFilter {
    /// Evaluate against a record
    ///
    /// `lookup` returns every value reachable through a field path (a path
    /// through a to-many relation may yield several). A leaf matches if any
    /// of those values matches.
    pub fn evaluate<F>(&self, lookup: &mut F) -> bool
    where
        F: FnMut(&FieldPath) -> Vec<String>,
    {
        match self {
            QueryFilter::Match(leaf) => lookup(&leaf.path)
                .iter()
                .any(|candidate| leaf.op.matches(candidate, &leaf.value)),
            QueryFilter::Or(children) => children.iter().any(|c| c.evaluate(lookup)),
            QueryFilter::And(children) => children.iter().all(|c| c.evaluate(lookup)),
        }
    }

    /// All leaves, depth first
    pub fn leaves(&self) -> Vec<&FieldMatch> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FieldMatch>) {
        match self {
            QueryFilter::Match(leaf) => out.push(leaf),
            QueryFilter::Or(children) | QueryFilter::And(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFilter::Match(leaf) => write!(f, "{} ilike {:?}", leaf.path, leaf.value),
            QueryFilter::Or(children) => write_joined(f, children, " OR "),
            QueryFilter::And(children) => write_joined(f, children, " AND "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[QueryFilter], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}
