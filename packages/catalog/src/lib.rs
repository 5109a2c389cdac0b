//! # Mosaic Catalog
//!
//! Static registry of component definitions for the Mosaic document builder.
//!
//! A definition describes one versioned component type: its default
//! configuration, the child tree it expands into when instantiated, and the
//! schema of its editable fields. The catalog is an ordered, append-only
//! sequence of definitions loaded once at startup; it exposes lookup and
//! nothing else. Live documents are the editor crate's concern.

mod catalog;
mod definition;
mod version;

pub use catalog::{Catalog, CatalogError};
pub use definition::{
    ChildTemplate, ComponentDefinition, ConfigField, ConfigMap, ConfigValue, SelectOption,
};
