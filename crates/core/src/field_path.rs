//! Dotted attribute paths
//!
//! A field path names an attribute on an entity type, optionally walking
//! through relation attributes first: `name`, `company.name`,
//! `project.owner.email`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dot-separated reference to an attribute
///
/// Paths are never empty and never contain empty segments.
///
/// # Examples
///
/// ```
/// use omnisearch_core::FieldPath;
///
/// let path: FieldPath = "company.name".parse().unwrap();
/// assert_eq!(path.root(), "company");
/// assert_eq!(path.segments(), ["company", "name"]);
/// assert!(path.is_nested());
/// assert_eq!(path.to_string(), "company.name");
///
/// assert!("company..name".parse::<FieldPath>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a path, rejecting empty input and empty segments
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::MalformedFieldPath {
                path: raw.to_string(),
                reason: "path is empty".to_string(),
            });
        }

        let mut segments = Vec::new();
        for (pos, segment) in trimmed.split('.').enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(Error::MalformedFieldPath {
                    path: raw.to_string(),
                    reason: format!("empty segment at position {}", pos),
                });
            }
            segments.push(segment.to_string());
        }

        Ok(FieldPath { segments })
    }

    /// First segment: the attribute looked up on the configured entity type
    pub fn root(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// All segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if there are no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if the path traverses at least one relation
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldPath::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        FieldPath::parse(&s)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
