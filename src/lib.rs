//! omnisearch - configurable keyword search across entity types
//!
//! One query string fans out over every active search configuration; each
//! entity type with matching records contributes one result group.
//!
//! # Quick Start
//!
//! ```ignore
//! use omnisearch::{ConfigStore, GlobalSearch, Identity, MemoryDatabase, SearchConfiguration};
//! use std::sync::Arc;
//!
//! let db = MemoryDatabase::from_file("crm.json".as_ref())?;
//! let store = Arc::new(ConfigStore::default());
//! omnisearch::ensure_defaults(&store, &db, &omnisearch::default_catalogue()?)?;
//!
//! let groups = GlobalSearch::new(store).search(&db, &Identity::user("alice"), "acme");
//! ```
//!
//! # Architecture
//!
//! - `omnisearch-core`: shared types and the collaborator traits
//! - `omnisearch-search`: validation, configuration store, compiler,
//!   orchestrator, seeder
//! - `omnisearch-engine`: in-memory collaborator loadable from JSON
//!
//! Any other backend plugs in by implementing [`SchemaProvider`] and
//! [`DataAccess`].

pub use omnisearch_core::*;
pub use omnisearch_engine::{Collection, CollectionDef, Dataset, MemoryDatabase};
pub use omnisearch_search::*;

/// Bundled catalogue source
pub const DEFAULT_CATALOGUE_TOML: &str = include_str!("../data/default_catalogue.toml");

/// The bundled catalogue of well-known entity types
///
/// Entity type names follow the business-suite conventions the catalogue
/// was written for; a backend using other names supplies its own catalogue.
pub fn default_catalogue() -> Result<Catalogue> {
    Catalogue::from_toml_str(DEFAULT_CATALOGUE_TOML)
}
