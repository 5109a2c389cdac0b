//! # Mosaic Editor
//!
//! Core document-tree editing engine for Mosaic.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: component definitions (schema)     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: live forest + mutations + history   │
//! │  - Instantiate definitions into live nodes  │
//! │  - Id-addressed add/delete/update/move      │
//! │  - Snapshot history with undo/redo          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ embedder: rendering, selection UI, storage  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Stable identity**: every live node keeps its id for its whole
//!    lifetime, across moves and updates.
//! 2. **Flat storage**: the forest lives in an id-keyed arena; nested
//!    component values only exist as detached copies at the boundary.
//! 3. **Atomic mutations**: operations validate first and splice second, so
//!    a failure leaves the document untouched.
//! 4. **Linear history**: one snapshot per committed mutation, truncating
//!    the redo branch on divergence.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mosaic_editor::{Catalog, ComponentSource, DefinitionRef, EditSession, InsertLocation};
//!
//! let catalog = Catalog::from_json(&schema_json)?;
//! let mut session = EditSession::new(catalog);
//!
//! // Drop a text component at the top of the document.
//! let id = session.add_component(
//!     ComponentSource::Definition(DefinitionRef::new("text")),
//!     InsertLocation::root(0),
//!     true,
//! )?;
//!
//! // Take it back.
//! session.undo()?;
//! assert!(session.can_redo());
//! ```

mod component;
mod document;
mod history;
mod instantiate;
mod mutations;
mod session;

pub use component::{Component, ComponentPatch};
pub use document::{Document, Location};
pub use history::HistoryStack;
pub use instantiate::{expand_template, instantiate};
pub use mutations::{
    ComponentSource, DefinitionRef, InsertLocation, Mutation, MutationError, SiblingPosition,
};
pub use session::{ActiveComponent, EditSession, SelectionSource};

// Re-export catalog types for convenience
pub use mosaic_catalog::{
    Catalog, CatalogError, ChildTemplate, ComponentDefinition, ConfigField, ConfigMap,
    ConfigValue, SelectOption,
};
