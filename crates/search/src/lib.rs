//! Global keyword search across configured entity types
//!
//! This crate provides:
//! - FieldPathResolver for checking field paths against runtime schemas
//! - ConfigStore holding validated search configurations
//! - Query compiler turning keywords into AND-of-ORs filters
//! - GlobalSearch orchestrating one query across every configuration
//! - Bootstrap seeder installing defaults from a catalogue
//! - SearchSettings loaded from `omnisearch.toml`
//!
//! # Usage
//!
//! ```ignore
//! use omnisearch_search::{ConfigStore, GlobalSearch};
//! use std::sync::Arc;
//!
//! let store = Arc::new(ConfigStore::default());
//! store.create(&db, SearchConfiguration::new("Contacts", "contact", "name,email"))?;
//!
//! let groups = GlobalSearch::new(store).search(&db, &Identity::user("alice"), "acme");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compiler;
pub mod orchestrator;
pub mod resolver;
pub mod seeder;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use compiler::{compile, split_words};
pub use orchestrator::GlobalSearch;
pub use resolver::{FieldPathResolver, ValidationPolicy};
pub use seeder::{ensure_defaults, Catalogue, CatalogueEntry, SeedReport};
pub use settings::{SearchSettings, DEFAULT_MIN_QUERY_LEN, SETTINGS_FILE_NAME};
pub use store::{ConfigEntry, ConfigStore};
