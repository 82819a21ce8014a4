//! Collaborator traits
//!
//! The search core owns no data. Everything it knows about entity types and
//! records comes through these traits, so any backend (an ORM, a database
//! client, the in-memory engine) can be plugged in.
//!
//! Thread safety: implementations must be `Send + Sync`; the orchestrator may
//! query several entity types concurrently.

use crate::error::Result;
use crate::filter::QueryFilter;
use crate::schema::AttributeSchema;
use crate::search_types::Record;
use crate::types::Identity;

/// Runtime registry of entity types and their attributes
pub trait SchemaProvider: Send + Sync {
    /// True if `entity_type` is currently available
    fn exists(&self, entity_type: &str) -> bool;

    /// Attribute schema of `entity_type`, `None` if it is not available
    fn attribute_schema(&self, entity_type: &str) -> Option<AttributeSchema>;
}

/// Executes filters against collections
///
/// Implementations enforce their own row-level permissions for `caller`.
pub trait DataAccess: SchemaProvider {
    /// Records of `entity_type` matching `filter`, at most `limit` of them,
    /// in the backend's native order
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` when `caller` may not read the entity
    /// type. Any other error is treated by callers as an unexpected failure.
    fn search(
        &self,
        entity_type: &str,
        filter: &QueryFilter,
        limit: usize,
        caller: &Identity,
    ) -> Result<Vec<Record>>;

    /// Canonical human-readable label of a record
    fn display_label(&self, entity_type: &str, record: &Record) -> String;
}
