//! JSON dataset loading
//!
//! A dataset describes every collection of a [`MemoryDatabase`] in one
//! document:
//!
//! ```json
//! {
//!   "collections": {
//!     "company": {
//!       "attributes": { "name": {} },
//!       "records": [ { "id": 1, "name": "Acme Corp" } ]
//!     },
//!     "contact": {
//!       "label_field": "name",
//!       "readers": ["alice"],
//!       "attributes": {
//!         "name": {},
//!         "email": {},
//!         "company": { "relation": "company" }
//!       },
//!       "records": [ { "id": 1, "name": "Paul Sems", "company": 1 } ]
//!     }
//!   }
//! }
//! ```
//!
//! `label_field` defaults to `name`. Omitting `readers` leaves the
//! collection open to every user. `owner_field` hides records from users
//! other than their owner.

use crate::collection::{Collection, DEFAULT_LABEL_FIELD};
use crate::database::MemoryDatabase;
use omnisearch_core::{AttributeSchema, Error, Record, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Whole-database description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Entity type → collection
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionDef>,
}

/// One collection of a [`Dataset`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionDef {
    /// Attribute schema
    #[serde(default)]
    pub attributes: AttributeSchema,
    /// Attribute holding the display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    /// Users allowed to read; absent means everyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readers: Option<Vec<String>>,
    /// Attribute naming the owning user of each record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_field: Option<String>,
    /// Records
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Dataset {
    /// Parse a dataset from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse dataset: {}", e)))
    }

    /// Read a dataset file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read dataset file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Build a database holding this dataset
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a relation attribute targets an entity
    /// type the dataset does not define.
    pub fn into_database(self) -> Result<MemoryDatabase> {
        for (entity_type, def) in &self.collections {
            for name in def.attributes.names() {
                let target = def
                    .attributes
                    .get(name)
                    .and_then(|a| a.related_entity_type());
                if let Some(target) = target {
                    if !self.collections.contains_key(target) {
                        return Err(Error::config(format!(
                            "Attribute '{}.{}' references unknown entity type '{}'",
                            entity_type, name, target
                        )));
                    }
                }
            }
        }

        let db = MemoryDatabase::new();
        let mut total = 0;
        for (entity_type, def) in self.collections {
            let mut collection = Collection::new(def.attributes).with_label_field(
                def.label_field
                    .unwrap_or_else(|| DEFAULT_LABEL_FIELD.to_string()),
            );
            if let Some(readers) = def.readers {
                collection = collection.with_readers(readers);
            }
            if let Some(owner) = def.owner_field {
                collection = collection.with_owner_field(owner);
            }
            total += def.records.len();
            for record in def.records {
                collection.upsert(record);
            }
            db.create_collection(entity_type, collection);
        }

        info!(
            target: "omnisearch::engine",
            collections = db.entity_types().len(),
            records = total,
            "Dataset loaded"
        );
        Ok(db)
    }
}

impl MemoryDatabase {
    /// Database from JSON dataset text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Dataset::from_json_str(content)?.into_database()
    }

    /// Database from a JSON dataset file
    pub fn from_file(path: &Path) -> Result<Self> {
        Dataset::from_file(path)?.into_database()
    }
}
