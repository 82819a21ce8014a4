//! Configuration store
//!
//! Holds the search configurations, validates every write, and hands out
//! active configurations in `(priority, id)` order.
//!
//! Validation tolerates entity types that are not currently available:
//! such configurations are stored after structural checks only, so that
//! integrations can be configured before they are installed. Availability
//! is re-checked at query time, never by rewriting stored entries.

use crate::resolver::{FieldPathResolver, ValidationPolicy};
use omnisearch_core::{
    ConfigId, Error, FieldPath, Result, SchemaProvider, SearchConfiguration,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// A stored configuration with its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Store-assigned id
    pub id: ConfigId,
    /// The configuration
    pub config: SearchConfiguration,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "configuration")]
    configurations: Vec<SearchConfiguration>,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    entries: BTreeMap<ConfigId, SearchConfiguration>,
}

impl StoreInner {
    fn insert(&mut self, config: SearchConfiguration) -> ConfigId {
        let id = ConfigId::new(self.next_id);
        self.next_id += 1;
        info!(
            target: "omnisearch::config",
            id = %id,
            label = %config.label,
            entity_type = %config.entity_type,
            "Search configuration created"
        );
        self.entries.insert(id, config);
        id
    }
}

/// In-memory configuration store
///
/// Reads take a shared lock; writes validate outside the lock and then
/// take it exclusively.
#[derive(Debug)]
pub struct ConfigStore {
    inner: RwLock<StoreInner>,
    policy: ValidationPolicy,
}

impl ConfigStore {
    /// Empty store validating field paths with `policy`
    pub fn new(policy: ValidationPolicy) -> Self {
        ConfigStore {
            inner: RwLock::new(StoreInner {
                next_id: 1,
                entries: BTreeMap::new(),
            }),
            policy,
        }
    }

    /// Field path validation policy
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Independent copy of every entry, ids included
    pub fn snapshot(&self) -> Self {
        let inner = self.inner.read();
        ConfigStore {
            inner: RwLock::new(StoreInner {
                next_id: inner.next_id,
                entries: inner.entries.clone(),
            }),
            policy: self.policy,
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check a configuration before it is written
    ///
    /// Structural checks always run: non-empty label and entity type, a
    /// positive limit when one is set, at least one well-formed field path.
    /// Attribute checks run only when the entity type is available.
    ///
    /// # Errors
    ///
    /// Returns a validation error (`Error::is_validation`) naming the
    /// offending field path and entity type where applicable.
    pub fn validate_on_write(
        &self,
        schema: &dyn SchemaProvider,
        config: &SearchConfiguration,
    ) -> Result<()> {
        if config.label.trim().is_empty() {
            return Err(Error::EmptyLabel);
        }
        let entity_type = config.entity_type.trim();
        if entity_type.is_empty() {
            return Err(Error::EmptyEntityType);
        }
        if config.result_limit == Some(0) {
            return Err(Error::InvalidResultLimit {
                entity_type: entity_type.to_string(),
                limit: 0,
            });
        }

        let fields = config.field_paths();
        if fields.is_empty() {
            return Err(Error::EmptyFieldList {
                entity_type: entity_type.to_string(),
            });
        }
        for raw in &fields {
            FieldPath::parse(raw)?;
        }

        if !schema.exists(entity_type) {
            debug!(
                target: "omnisearch::config",
                entity_type,
                "Entity type not available, skipping field validation"
            );
            return Ok(());
        }

        let resolver = FieldPathResolver::new(schema, self.policy);
        for raw in &fields {
            resolver.validate(entity_type, raw)?;
        }
        Ok(())
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Validate and store a new configuration
    pub fn create(
        &self,
        schema: &dyn SchemaProvider,
        config: SearchConfiguration,
    ) -> Result<ConfigId> {
        self.validate_on_write(schema, &config)?;

        Ok(self.inner.write().insert(config))
    }

    /// Validate and store a configuration unless its `(entity_type, label)`
    /// pair is already taken
    ///
    /// The existence check and the insert share one write lock, so
    /// concurrent callers never store the same pair twice. Returns `None`
    /// when the pair exists, active or not.
    pub fn create_if_absent(
        &self,
        schema: &dyn SchemaProvider,
        config: SearchConfiguration,
    ) -> Result<Option<ConfigId>> {
        self.validate_on_write(schema, &config)?;

        let mut inner = self.inner.write();
        let taken = inner
            .entries
            .values()
            .any(|c| c.entity_type == config.entity_type && c.label == config.label);
        if taken {
            return Ok(None);
        }
        Ok(Some(inner.insert(config)))
    }

    /// Validate and replace an existing configuration
    pub fn update(
        &self,
        schema: &dyn SchemaProvider,
        id: ConfigId,
        config: SearchConfiguration,
    ) -> Result<()> {
        if !self.inner.read().entries.contains_key(&id) {
            return Err(Error::ConfigNotFound(id));
        }
        self.validate_on_write(schema, &config)?;

        let mut inner = self.inner.write();
        let slot = inner.entries.get_mut(&id).ok_or(Error::ConfigNotFound(id))?;
        *slot = config;
        info!(target: "omnisearch::config", id = %id, "Search configuration updated");
        Ok(())
    }

    /// Soft-delete: the configuration stays stored but stops taking part
    pub fn deactivate(&self, id: ConfigId) -> Result<()> {
        let mut inner = self.inner.write();
        let slot = inner.entries.get_mut(&id).ok_or(Error::ConfigNotFound(id))?;
        slot.active = false;
        info!(target: "omnisearch::config", id = %id, "Search configuration deactivated");
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Configuration by id
    pub fn get(&self, id: ConfigId) -> Option<SearchConfiguration> {
        self.inner.read().entries.get(&id).cloned()
    }

    /// Id of the configuration with this `(entity_type, label)` pair, active or not
    pub fn find_by(&self, entity_type: &str, label: &str) -> Option<ConfigId> {
        self.inner
            .read()
            .entries
            .iter()
            .find(|(_, c)| c.entity_type == entity_type && c.label == label)
            .map(|(id, _)| *id)
    }

    /// Active configurations ordered by `(priority, id)`
    pub fn list_active(&self) -> Vec<ConfigEntry> {
        let mut out: Vec<ConfigEntry> = self
            .inner
            .read()
            .entries
            .iter()
            .filter(|(_, c)| c.active)
            .map(|(id, c)| ConfigEntry {
                id: *id,
                config: c.clone(),
            })
            .collect();
        out.sort_by_key(|e| (e.config.priority, e.id));
        out
    }

    /// Every configuration, ordered by `(priority, id)`
    pub fn list_all(&self) -> Vec<ConfigEntry> {
        let mut out: Vec<ConfigEntry> = self
            .inner
            .read()
            .entries
            .iter()
            .map(|(id, c)| ConfigEntry {
                id: *id,
                config: c.clone(),
            })
            .collect();
        out.sort_by_key(|e| (e.config.priority, e.id));
        out
    }

    /// Number of stored configurations, active or not
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Load configurations from a TOML file of `[[configuration]]` tables
    ///
    /// Stored entries are kept as written; ids follow file order. See
    /// [`ConfigStore::from_toml_str`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(
        path: &Path,
        schema: &dyn SchemaProvider,
        policy: ValidationPolicy,
    ) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content, schema, policy).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Load configurations from TOML text
    ///
    /// Write validation is not enforced here. An entry that no longer
    /// validates against `schema` (an attribute was dropped since it was
    /// written) is logged and stored anyway; at query time it fails on its
    /// own without affecting the other entity types.
    pub fn from_toml_str(
        content: &str,
        schema: &dyn SchemaProvider,
        policy: ValidationPolicy,
    ) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse configurations: {}", e)))?;

        let store = ConfigStore::new(policy);
        {
            let mut inner = store.inner.write();
            for config in file.configurations {
                if let Err(e) = store.validate_on_write(schema, &config) {
                    warn!(
                        target: "omnisearch::config",
                        label = %config.label,
                        entity_type = %config.entity_type,
                        error = %e,
                        "Stored configuration no longer validates"
                    );
                }
                inner.insert(config);
            }
        }
        Ok(store)
    }

    /// Write all configurations, in id order, as TOML
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let file = ConfigFile {
            configurations: self.inner.read().entries.values().cloned().collect(),
        };
        let content = toml::to_string_pretty(&file)
            .map_err(|e| Error::config(format!("Failed to serialize configurations: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        ConfigStore::new(ValidationPolicy::default())
    }
}
