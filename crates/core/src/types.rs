//! Core types for omnisearch
//!
//! This module defines the foundational types:
//! - ConfigId: Identity of a stored search configuration
//! - Identity: The caller on whose behalf data is read
//! - SearchConfiguration: How one entity type participates in search

use serde::{Deserialize, Serialize};
use std::fmt;

/// Icon used when a configuration does not name one
pub const DEFAULT_ICON: &str = "fa-file";

/// Per-type result cap used when a configuration does not set one
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Priority given to configurations that do not set one
pub const DEFAULT_PRIORITY: i32 = 10;

/// Identifier of a stored search configuration
///
/// Ids are assigned by the configuration store in insertion order and
/// double as the tie-breaker when two configurations share a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfigId(u64);

impl ConfigId {
    /// Wrap a raw id
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity on whose behalf a read is performed
///
/// Search never elevates: record queries always run as the caller.
/// `System` exists for administrative reads (configuration metadata,
/// bootstrap) and is honoured by the data-access layer as a bypass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    /// An authenticated end user
    User(String),
    /// Administrative identity, bypasses row-level permissions
    System,
}

impl Identity {
    /// Shorthand for `Identity::User`
    pub fn user(name: impl Into<String>) -> Self {
        Identity::User(name.into())
    }

    /// True for the administrative identity
    pub fn is_system(&self) -> bool {
        matches!(self, Identity::System)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::User(name) => write!(f, "user:{}", name),
            Identity::System => write!(f, "system"),
        }
    }
}

/// How one entity type participates in global search
///
/// `search_fields` is kept in its stored comma-separated form; use
/// [`SearchConfiguration::field_paths`] for the parsed list.
///
/// # Example
///
/// ```
/// use omnisearch_core::SearchConfiguration;
///
/// let config = SearchConfiguration::new("Contacts", "contact", "name, email ,phone");
/// assert_eq!(config.field_paths(), vec!["name", "email", "phone"]);
/// assert_eq!(config.icon_or(omnisearch_core::DEFAULT_ICON), "fa-file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfiguration {
    /// Display name of the result group
    pub label: String,
    /// Technical name of the target collection
    pub entity_type: String,
    /// Comma-separated dotted field paths
    pub search_fields: String,
    /// Presentational icon; `None` falls back to the default icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Sort key, lower first
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Whether the configuration takes part in searches
    #[serde(default = "default_active")]
    pub active: bool,
    /// Per-type cap on returned records; `None` falls back to the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_limit: Option<usize>,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_active() -> bool {
    true
}

impl SearchConfiguration {
    /// Create an active configuration with default icon, priority and limit
    pub fn new(
        label: impl Into<String>,
        entity_type: impl Into<String>,
        search_fields: impl Into<String>,
    ) -> Self {
        SearchConfiguration {
            label: label.into(),
            entity_type: entity_type.into(),
            search_fields: search_fields.into(),
            icon: None,
            priority: DEFAULT_PRIORITY,
            active: true,
            result_limit: None,
        }
    }

    /// Builder: set icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Builder: set priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builder: set result limit
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = Some(limit);
        self
    }

    /// Builder: set active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Parsed field paths, trimmed, empty entries dropped
    pub fn field_paths(&self) -> Vec<String> {
        parse_field_list(&self.search_fields)
    }

    /// Icon, or `default` when none is set
    pub fn icon_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.icon.as_deref() {
            Some(icon) if !icon.trim().is_empty() => icon,
            _ => default,
        }
    }

    /// Result limit, or `default` when none is set
    pub fn limit_or(&self, default: usize) -> usize {
        self.result_limit.unwrap_or(default)
    }
}

/// Split a stored comma-separated field list
///
/// Entries are trimmed and empty entries are discarded, so `" name,,email "`
/// yields `["name", "email"]`.
pub fn parse_field_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
