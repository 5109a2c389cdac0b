//! # Document Mutations
//!
//! High-level semantic operations on the document forest.
//!
//! Each mutation is an intent: add, delete, update, or move a component,
//! addressed by stable id. Mutations validate before they splice, so a
//! failed application leaves the document in its pre-operation state. That
//! includes moves, which are applied as a single relocation rather than an
//! insert/delete pair.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mosaic_catalog::Catalog;

use crate::component::{Component, ComponentPatch};
use crate::document::Document;
use crate::instantiate;

/// Where an insert or move lands. A `None` target id means the document
/// root forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InsertLocation {
    /// As a child of the target, at an ordinal position. Out-of-range
    /// positions clamp into `[0, len]` rather than failing.
    Parent {
        component_id: Option<String>,
        position: isize,
    },
    /// Immediately before or after the target within its parent. With no
    /// target this appends to the root forest.
    Sibling {
        component_id: Option<String>,
        position: SiblingPosition,
    },
}

impl InsertLocation {
    /// Child of `parent_id` at `position`.
    pub fn child_of(parent_id: impl Into<String>, position: isize) -> Self {
        InsertLocation::Parent {
            component_id: Some(parent_id.into()),
            position,
        }
    }

    /// Root forest at `position`.
    pub fn root(position: isize) -> Self {
        InsertLocation::Parent {
            component_id: None,
            position,
        }
    }

    pub fn before(sibling_id: impl Into<String>) -> Self {
        InsertLocation::Sibling {
            component_id: Some(sibling_id.into()),
            position: SiblingPosition::Before,
        }
    }

    pub fn after(sibling_id: impl Into<String>) -> Self {
        InsertLocation::Sibling {
            component_id: Some(sibling_id.into()),
            position: SiblingPosition::After,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SiblingPosition {
    Before,
    After,
}

/// Reference to a catalog definition: a type plus an optional version pin.
/// No version means the highest available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionRef {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DefinitionRef {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            version: None,
        }
    }

    pub fn versioned(component_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            version: Some(version.into()),
        }
    }
}

/// What an add inserts: a definition to instantiate, or a fully-formed
/// component whose ids the caller guarantees unique (document load, moves
/// between documents, tests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ComponentSource {
    Definition(DefinitionRef),
    Literal(Component),
}

impl ComponentSource {
    /// Produce the component to insert: instantiate a definition reference
    /// (with its default children) or take the literal as given.
    pub(crate) fn realize(&self, catalog: &Catalog) -> Result<Component, MutationError> {
        match self {
            ComponentSource::Definition(reference) => {
                let definition = catalog
                    .resolve(&reference.component_type, reference.version.as_deref())
                    .ok_or_else(|| MutationError::DefinitionNotFound {
                        component_type: reference.component_type.clone(),
                        version: reference.version.clone(),
                    })?;
                instantiate::instantiate(definition, catalog)
            }
            ComponentSource::Literal(component) => Ok(component.clone()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("no definition for component type {component_type:?} at version {version:?}")]
    DefinitionNotFound {
        component_type: String,
        version: Option<String>,
    },

    #[error("component not found: {0}")]
    TargetNotFound(String),

    #[error("invalid child template: {0}")]
    InvalidChildSpec(String),

    #[error("duplicate component id: {0}")]
    DuplicateId(String),

    #[error("cannot move {component_id} into its own subtree")]
    CycleDetected { component_id: String },
}

/// Semantic mutations over the document forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    AddComponent {
        source: ComponentSource,
        location: InsertLocation,
    },
    DeleteComponent {
        component_id: String,
    },
    UpdateComponent {
        component_id: String,
        patch: ComponentPatch,
    },
    MoveComponent {
        component_id: String,
        location: InsertLocation,
    },
}

impl Mutation {
    /// Apply to the document. Returns the id of the newly inserted root for
    /// an add, `None` otherwise.
    pub fn apply(
        &self,
        document: &mut Document,
        catalog: &Catalog,
    ) -> Result<Option<String>, MutationError> {
        match self {
            Mutation::AddComponent { source, location } => {
                let component = source.realize(catalog)?;
                let component_id = component.id.clone();
                document.insert(component, location)?;
                tracing::debug!(component_id = %component_id, "component added");
                Ok(Some(component_id))
            }
            Mutation::DeleteComponent { component_id } => {
                document.detach(component_id)?;
                tracing::debug!(component_id = %component_id, "component deleted");
                Ok(None)
            }
            Mutation::UpdateComponent {
                component_id,
                patch,
            } => {
                document.update(component_id, patch)?;
                tracing::debug!(component_id = %component_id, "component updated");
                Ok(None)
            }
            Mutation::MoveComponent {
                component_id,
                location,
            } => {
                document.relocate(component_id, location)?;
                tracing::debug!(component_id = %component_id, "component moved");
                Ok(None)
            }
        }
    }
}
