//! In-memory data-access engine
//!
//! This crate provides:
//! - Collection: records of one entity type with schema and access rules
//! - MemoryDatabase: collections behind a lock, implementing the
//!   `SchemaProvider` and `DataAccess` collaborator traits
//! - Dataset: JSON description of a whole database
//!
//! The engine is the only component that knows how records are stored and
//! how relation paths are followed. The search core sees it through the
//! collaborator traits alone.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod database;
pub mod dataset;

pub use collection::{Collection, DEFAULT_LABEL_FIELD};
pub use database::MemoryDatabase;
pub use dataset::{CollectionDef, Dataset};
