//! Error types for omnisearch
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Errors fall into three families:
//! - Validation errors: a configuration write was rejected and must not be stored
//! - Access errors: the data-access layer refused a read for the caller
//! - Everything else: I/O, parse and internal failures

use crate::types::ConfigId;
use std::io;
use thiserror::Error;

/// Result type alias for omnisearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for omnisearch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration label is empty
    #[error("Validation error: label must not be empty")]
    EmptyLabel,

    /// Configuration entity type is empty
    #[error("Validation error: entity type must not be empty")]
    EmptyEntityType,

    /// No field paths remain after parsing the comma-separated list
    #[error("Validation error: no search fields configured for '{entity_type}'")]
    EmptyFieldList {
        /// Entity type the configuration targets
        entity_type: String,
    },

    /// A field path does not resolve against the entity schema
    #[error("Validation error: field '{path}' is invalid on '{entity_type}': {reason} ('{segment}')")]
    InvalidFieldPath {
        /// Entity type on which the offending segment was looked up
        entity_type: String,
        /// Full field path as configured
        path: String,
        /// Segment that failed to resolve
        segment: String,
        /// Why the segment was rejected
        reason: String,
    },

    /// A field path is syntactically malformed (empty segment, stray dot)
    #[error("Validation error: malformed field path '{path}': {reason}")]
    MalformedFieldPath {
        /// Field path as written
        path: String,
        /// Description of the problem
        reason: String,
    },

    /// Result limit must be positive
    #[error("Validation error: result limit for '{entity_type}' must be positive, got {limit}")]
    InvalidResultLimit {
        /// Entity type the configuration targets
        entity_type: String,
        /// Rejected limit
        limit: usize,
    },

    /// The data-access layer refused the read for this caller
    #[error("Access denied on '{entity_type}' for {identity}")]
    AccessDenied {
        /// Entity type that was queried
        entity_type: String,
        /// Caller identity, rendered for diagnostics
        identity: String,
    },

    /// Entity type is not available in the running environment
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    /// No stored configuration has this id
    #[error("Configuration not found: {0}")]
    ConfigNotFound(ConfigId),

    /// Settings, dataset or catalogue could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invariant violated inside a collaborator
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors that reject a configuration write
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyLabel
                | Error::EmptyEntityType
                | Error::EmptyFieldList { .. }
                | Error::InvalidFieldPath { .. }
                | Error::MalformedFieldPath { .. }
                | Error::InvalidResultLimit { .. }
        )
    }

    /// True when the data-access layer refused the read
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied { .. })
    }

    /// Build an `InvalidFieldPath` error
    pub fn invalid_field(
        entity_type: impl Into<String>,
        path: impl Into<String>,
        segment: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidFieldPath {
            entity_type: entity_type.into(),
            path: path.into(),
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Build a `Config` error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Build an `Internal` error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_field_list() {
        let err = Error::EmptyFieldList {
            entity_type: "contact".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Validation error"));
        assert!(msg.contains("contact"));
    }

    #[test]
    fn test_error_display_invalid_field_names_segment_and_type() {
        let err = Error::invalid_field("contact", "company.nme", "nme", "unknown attribute");
        let msg = err.to_string();
        assert!(msg.contains("company.nme"));
        assert!(msg.contains("'nme'"));
        assert!(msg.contains("contact"));
    }

    #[test]
    fn test_error_display_access_denied() {
        let err = Error::AccessDenied {
            entity_type: "task".to_string(),
            identity: "user:bob".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Access denied"));
        assert!(msg.contains("user:bob"));
    }

    #[test]
    fn test_error_display_config_not_found() {
        let err = Error::ConfigNotFound(ConfigId::new(7));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::EmptyLabel.is_validation());
        assert!(Error::EmptyEntityType.is_validation());
        assert!(Error::InvalidResultLimit {
            entity_type: "x".into(),
            limit: 0
        }
        .is_validation());
        assert!(Error::MalformedFieldPath {
            path: "a..b".into(),
            reason: "empty segment".into()
        }
        .is_validation());
        assert!(!Error::internal("boom").is_validation());
        assert!(!Error::UnknownEntityType("x".into()).is_validation());
    }

    #[test]
    fn test_access_denied_classification() {
        let err = Error::AccessDenied {
            entity_type: "task".into(),
            identity: "user:bob".into(),
        };
        assert!(err.is_access_denied());
        assert!(!err.is_validation());
        assert!(!Error::config("bad").is_access_denied());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
