//! Bootstrap seeder
//!
//! Installs default configurations from a catalogue of well-known entity
//! types. The catalogue is data: this module knows nothing about any
//! concrete entity type.
//!
//! Seeding is idempotent. An entry is skipped when its entity type is not
//! available, when a configuration with the same `(entity_type, label)`
//! already exists, or when none of its field paths are valid. Invalid
//! field paths are dropped silently from otherwise usable entries.

use crate::resolver::FieldPathResolver;
use crate::store::ConfigStore;
use omnisearch_core::{
    parse_field_list, Error, Result, SchemaProvider, SearchConfiguration, DEFAULT_ICON,
    DEFAULT_PRIORITY,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One row of a catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    /// Group label
    pub label: String,
    /// Entity type the entry targets
    pub entity_type: String,
    /// Comma-separated field paths
    pub search_fields: String,
    /// Icon identifier
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Sort key
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// Ordered table of default configurations
///
/// # Example
///
/// ```toml
/// [[entry]]
/// label = "Contacts"
/// entity_type = "contact"
/// search_fields = "name,email,phone"
/// icon = "fa-address-book"
/// priority = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Rows in seeding order
    #[serde(default, rename = "entry")]
    pub entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    /// Parse a catalogue from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse catalogue: {}", e)))
    }

    /// Read a catalogue file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read catalogue file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a seeding run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Configurations created
    pub created: usize,
    /// Entries whose entity type is not available
    pub skipped_unavailable: usize,
    /// Entries already configured
    pub skipped_existing: usize,
    /// Entries left with no valid field path
    pub skipped_no_valid_fields: usize,
}

impl SeedReport {
    /// Entries not created, for any reason
    pub fn skipped(&self) -> usize {
        self.skipped_unavailable + self.skipped_existing + self.skipped_no_valid_fields
    }
}

/// Create a configuration for every applicable catalogue entry
///
/// Field paths are filtered with the store's validation policy. Safe to call
/// on every start-up, and from several threads at once: each pair is
/// stored at most once.
///
/// # Errors
///
/// Only store write failures propagate; skipped entries are reported in the
/// returned [`SeedReport`].
pub fn ensure_defaults(
    store: &ConfigStore,
    schema: &dyn SchemaProvider,
    catalogue: &Catalogue,
) -> Result<SeedReport> {
    let resolver = FieldPathResolver::new(schema, store.policy());
    let mut report = SeedReport::default();

    for entry in &catalogue.entries {
        let entity_type = entry.entity_type.as_str();

        if !schema.exists(entity_type) {
            debug!(target: "omnisearch::seed", entity_type, "Entity type not available");
            report.skipped_unavailable += 1;
            continue;
        }

        if store.find_by(entity_type, &entry.label).is_some() {
            debug!(
                target: "omnisearch::seed",
                entity_type,
                label = %entry.label,
                "Already configured"
            );
            report.skipped_existing += 1;
            continue;
        }

        let requested = parse_field_list(&entry.search_fields);
        let valid = resolver.retain_valid(entity_type, &requested);
        if valid.is_empty() {
            debug!(
                target: "omnisearch::seed",
                entity_type,
                fields = %entry.search_fields,
                "No valid field paths"
            );
            report.skipped_no_valid_fields += 1;
            continue;
        }

        let config = SearchConfiguration::new(entry.label.as_str(), entity_type, valid.join(","))
            .with_icon(entry.icon.as_str())
            .with_priority(entry.priority);
        let id = match store.create_if_absent(schema, config)? {
            Some(id) => id,
            None => {
                report.skipped_existing += 1;
                continue;
            }
        };
        info!(
            target: "omnisearch::seed",
            id = %id,
            entity_type,
            label = %entry.label,
            fields = valid.len(),
            "Default search configured"
        );
        report.created += 1;
    }

    Ok(report)
}
