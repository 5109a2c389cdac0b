//! # Edit Session
//!
//! One editing surface over a document: the catalog it instantiates from,
//! the live forest, the selection, and the snapshot history. All state is
//! constructor-injected; there is no ambient "current session".
//!
//! Every successful mutation commits exactly one snapshot unless the caller
//! suppresses it, so one user-visible action always undoes in one step.

use serde::{Deserialize, Serialize};

use mosaic_catalog::Catalog;

use crate::component::{Component, ComponentPatch};
use crate::document::{Document, Location};
use crate::history::HistoryStack;
use crate::mutations::{ComponentSource, InsertLocation, Mutation, MutationError};

/// Which surface last set the selection. Carried through unchanged; the
/// engine never acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionSource {
    Tree,
    Canvas,
}

/// The currently selected component, if any, and who selected it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveComponent {
    pub component_id: Option<String>,
    pub set_by: Option<SelectionSource>,
}

/// Editing state for one document.
#[derive(Debug)]
pub struct EditSession {
    catalog: Catalog,
    document: Document,
    active: ActiveComponent,
    history: HistoryStack,
}

impl EditSession {
    /// Start an empty session over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            document: Document::new(),
            active: ActiveComponent::default(),
            history: HistoryStack::new(),
        }
    }

    /// Start a session with a bounded history depth (0 = unlimited).
    pub fn with_max_history(catalog: Catalog, max_levels: usize) -> Self {
        Self {
            history: HistoryStack::with_max_levels(max_levels),
            ..Self::new(catalog)
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the whole forest, e.g. on document load. The input is taken
    /// by value, so the installed forest shares nothing with the caller.
    /// Selection and history are left alone; new-document flows should also
    /// call [`EditSession::clear_history`].
    pub fn set_document(&mut self, components: Vec<Component>) -> Result<(), MutationError> {
        self.document = Document::from_components(components)?;
        Ok(())
    }

    /// Detached copy of the forest in the exchange shape.
    pub fn document(&self) -> Vec<Component> {
        self.document.to_components()
    }

    /// Detached copy of one component subtree.
    pub fn component(&self, component_id: &str) -> Option<Component> {
        self.document.component(component_id)
    }

    /// Find a component by id and describe where it sits.
    pub fn locate(&self, component_id: &str) -> Option<Location> {
        self.document.locate(component_id)
    }

    pub fn set_active_component(
        &mut self,
        component_id: Option<String>,
        set_by: Option<SelectionSource>,
    ) {
        self.active = ActiveComponent {
            component_id,
            set_by,
        };
    }

    pub fn active_component(&self) -> &ActiveComponent {
        &self.active
    }

    /// Instantiate a definition (or insert a literal component) at the given
    /// location. Returns the new component's id.
    pub fn add_component(
        &mut self,
        source: ComponentSource,
        location: InsertLocation,
        record_history: bool,
    ) -> Result<String, MutationError> {
        let component = source.realize(&self.catalog)?;
        let component_id = component.id.clone();
        self.apply(
            &Mutation::AddComponent {
                source: ComponentSource::Literal(component),
                location,
            },
            record_history,
        )?;
        Ok(component_id)
    }

    /// Delete a component and its subtree. Clears the selection when the
    /// deleted component was the active one.
    pub fn delete_component(
        &mut self,
        component_id: &str,
        record_history: bool,
    ) -> Result<(), MutationError> {
        self.apply(
            &Mutation::DeleteComponent {
                component_id: component_id.to_string(),
            },
            record_history,
        )
        .map(drop)
    }

    /// Shallow-merge a patch into a component; a present `config` replaces
    /// the node's whole map.
    pub fn update_component_by_id(
        &mut self,
        component_id: &str,
        patch: ComponentPatch,
        record_history: bool,
    ) -> Result<(), MutationError> {
        self.apply(
            &Mutation::UpdateComponent {
                component_id: component_id.to_string(),
                patch,
            },
            record_history,
        )
        .map(drop)
    }

    /// Move a component to a new location. The component keeps its id, so
    /// an active selection on it survives the move.
    pub fn move_component(
        &mut self,
        component_id: &str,
        location: InsertLocation,
        record_history: bool,
    ) -> Result<(), MutationError> {
        self.apply(
            &Mutation::MoveComponent {
                component_id: component_id.to_string(),
                location,
            },
            record_history,
        )
        .map(drop)
    }

    /// Apply one mutation, then commit one snapshot unless suppressed.
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        record_history: bool,
    ) -> Result<Option<String>, MutationError> {
        let inserted = mutation.apply(&mut self.document, &self.catalog)?;

        if let Mutation::DeleteComponent { component_id } = mutation {
            if self.active.component_id.as_deref() == Some(component_id) {
                self.active = ActiveComponent::default();
            }
        }

        if record_history {
            self.history.commit(&self.document.to_components());
        }
        Ok(inserted)
    }

    /// Step back one snapshot and install it. Clears the selection, since it
    /// may target ids absent from the restored state. Returns whether a step
    /// was taken.
    pub fn undo(&mut self) -> Result<bool, MutationError> {
        let Some(snapshot) = self.history.undo() else {
            return Ok(false);
        };
        self.document = Document::from_components(snapshot)?;
        self.active = ActiveComponent::default();
        tracing::debug!("undo applied");
        Ok(true)
    }

    /// Step forward one snapshot and install it. The selection is left
    /// alone. Returns whether a step was taken.
    pub fn redo(&mut self) -> Result<bool, MutationError> {
        let Some(snapshot) = self.history.redo() else {
            return Ok(false);
        };
        self.document = Document::from_components(snapshot)?;
        tracing::debug!("redo applied");
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
