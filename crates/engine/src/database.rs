//! In-memory database
//!
//! A map of entity type → [`Collection`] behind a single `RwLock`. Searches
//! evaluate a [`QueryFilter`] record by record, resolving dotted field paths
//! through relation attributes into the related collections.
//!
//! ## Path resolution
//!
//! - last segment, scalar attribute: the value's text (array elements each)
//! - last segment, relation attribute: the display labels of related records
//! - inner segment, relation attribute: continue on each related record
//! - inner segment, scalar attribute: nothing
//!
//! Missing attributes and dangling ids resolve to nothing, so a leaf over
//! them is simply false.

use crate::collection::{related_ids, scalar_texts, Collection};
use omnisearch_core::{
    AttributeSchema, DataAccess, Error, FieldPath, Identity, QueryFilter, Record, Result,
    SchemaProvider,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

type Collections = BTreeMap<String, Collection>;

/// In-memory implementation of the data-access collaborator
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    collections: RwLock<Collections>,
}

impl MemoryDatabase {
    /// Empty database
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Register `collection` under `entity_type`, replacing any previous one
    pub fn create_collection(&self, entity_type: impl Into<String>, collection: Collection) {
        let entity_type = entity_type.into();
        debug!(target: "omnisearch::engine", entity_type = %entity_type, "Collection created");
        self.collections.write().insert(entity_type, collection);
    }

    /// Remove a collection; returns whether it existed
    ///
    /// Models an integration being uninstalled: configurations that point at
    /// it stay stored and are skipped at search time.
    pub fn drop_collection(&self, entity_type: &str) -> bool {
        self.collections.write().remove(entity_type).is_some()
    }

    /// Entity types in name order
    pub fn entity_types(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    /// Number of records in a collection
    pub fn record_count(&self, entity_type: &str) -> Option<usize> {
        self.collections.read().get(entity_type).map(Collection::len)
    }

    // ========================================================================
    // Records and access
    // ========================================================================

    /// Insert or replace a record
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownEntityType` if the collection does not exist.
    pub fn insert(&self, entity_type: &str, record: Record) -> Result<()> {
        let mut collections = self.collections.write();
        let collection = collections
            .get_mut(entity_type)
            .ok_or_else(|| Error::UnknownEntityType(entity_type.to_string()))?;
        collection.upsert(record);
        Ok(())
    }

    /// Limit reads of a collection to `readers`
    pub fn restrict_readers<I, S>(&self, entity_type: &str, readers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let readers: BTreeSet<String> = readers.into_iter().map(Into::into).collect();
        self.with_collection_mut(entity_type, |c| c.set_readers(Some(readers)))
    }

    /// Let everyone read a collection
    pub fn open_readers(&self, entity_type: &str) -> Result<()> {
        self.with_collection_mut(entity_type, |c| c.set_readers(None))
    }

    fn with_collection_mut<F>(&self, entity_type: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Collection),
    {
        let mut collections = self.collections.write();
        let collection = collections
            .get_mut(entity_type)
            .ok_or_else(|| Error::UnknownEntityType(entity_type.to_string()))?;
        f(collection);
        Ok(())
    }
}

// ============================================================================
// Path resolution
// ============================================================================

fn values_at(
    collections: &Collections,
    entity_type: &str,
    record: &Record,
    segments: &[String],
    out: &mut Vec<String>,
) {
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => return,
    };
    let value = match record.get(first) {
        Some(value) => value,
        None => return,
    };
    let target = collections
        .get(entity_type)
        .and_then(|c| c.schema().get(first))
        .and_then(|a| a.related_entity_type());

    match target {
        None if rest.is_empty() => scalar_texts(value, out),
        None => {}
        Some(target) => {
            let related = match collections.get(target) {
                Some(related) => related,
                None => return,
            };
            for id in related_ids(value) {
                let Some(next) = related.get(id) else {
                    continue;
                };
                if rest.is_empty() {
                    out.push(related.label_of(target, next));
                } else {
                    values_at(collections, target, next, rest, out);
                }
            }
        }
    }
}

// ============================================================================
// Collaborator traits
// ============================================================================

impl SchemaProvider for MemoryDatabase {
    fn exists(&self, entity_type: &str) -> bool {
        self.collections.read().contains_key(entity_type)
    }

    fn attribute_schema(&self, entity_type: &str) -> Option<AttributeSchema> {
        self.collections
            .read()
            .get(entity_type)
            .map(|c| c.schema().clone())
    }
}

impl DataAccess for MemoryDatabase {
    fn search(
        &self,
        entity_type: &str,
        filter: &QueryFilter,
        limit: usize,
        caller: &Identity,
    ) -> Result<Vec<Record>> {
        let collections = self.collections.read();
        let collection = collections
            .get(entity_type)
            .ok_or_else(|| Error::UnknownEntityType(entity_type.to_string()))?;

        if !collection.can_read(caller) {
            return Err(Error::AccessDenied {
                entity_type: entity_type.to_string(),
                identity: caller.to_string(),
            });
        }

        let hits: Vec<Record> = collection
            .records()
            .filter(|record| collection.can_see(caller, record))
            .filter(|record| {
                filter.evaluate(&mut |path: &FieldPath| {
                    let mut out = Vec::new();
                    values_at(&collections, entity_type, record, path.segments(), &mut out);
                    out
                })
            })
            .take(limit)
            .cloned()
            .collect();

        debug!(
            target: "omnisearch::engine",
            entity_type,
            hits = hits.len(),
            limit,
            "Filter evaluated"
        );
        Ok(hits)
    }

    fn display_label(&self, entity_type: &str, record: &Record) -> String {
        match self.collections.read().get(entity_type) {
            Some(collection) => collection.label_of(entity_type, record),
            None => format!("{},{}", entity_type, record.id),
        }
    }
}
