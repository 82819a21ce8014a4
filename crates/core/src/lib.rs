//! Core types and traits for omnisearch
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: Error type hierarchy
//! - SearchConfiguration, ConfigId, Identity: configuration model and caller
//! - FieldPath: dotted attribute paths
//! - QueryFilter: compiled boolean filters
//! - AttributeSchema: runtime schema of an entity type
//! - Search types: SearchRequest, Record, RecordRef, SearchResultGroup
//! - Traits: collaborator interfaces (SchemaProvider, DataAccess)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field_path;
pub mod filter;
pub mod schema;
pub mod search_types;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use field_path::FieldPath;
pub use filter::{FieldMatch, MatchOp, QueryFilter};
pub use schema::{Attribute, AttributeSchema};
pub use search_types::{Record, RecordRef, SearchRequest, SearchResultGroup};
pub use traits::{DataAccess, SchemaProvider};
pub use types::{
    parse_field_list, ConfigId, Identity, SearchConfiguration, DEFAULT_ICON, DEFAULT_PRIORITY,
    DEFAULT_RESULT_LIMIT,
};
