//! # Document Forest
//!
//! The live document is a forest of component nodes stored as a flat,
//! id-keyed arena: every node sits in one table entry holding its data, its
//! parent id, and its children as an ordered list of ids. The nested
//! [`Component`] shape exists only at the exchange boundary (load, export,
//! history snapshots), so no caller ever holds a live handle into a child
//! list across a mutation.
//!
//! All structural operations are id-addressed and atomic: they validate
//! targets and identities first and only then splice, so a failed operation
//! leaves the forest exactly as it was.

use std::collections::{HashMap, HashSet};

use mosaic_catalog::ConfigMap;

use crate::component::{Component, ComponentPatch};
use crate::mutations::{InsertLocation, MutationError, SiblingPosition};

/// Arena entry for one component. Children are ordered ids into the same
/// table.
#[derive(Debug, Clone, PartialEq)]
struct Node {
    component_type: String,
    version: String,
    config: ConfigMap,
    internal_name: Option<String>,
    parent: Option<String>,
    children: Vec<String>,
}

/// Where a component sits in the forest.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Parent id, `None` for a root.
    pub parent: Option<String>,
    /// Index within the parent's child list (or the root list).
    pub index: usize,
    /// Ids from the root down to the component itself.
    pub id_path: Vec<String>,
    /// Sibling indices matching `id_path`.
    pub index_path: Vec<usize>,
}

/// The live document forest.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: HashMap<String, Node>,
    roots: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from externally supplied nested components, e.g. a
    /// loaded document. Every id in the input must be unique.
    pub fn from_components(components: Vec<Component>) -> Result<Self, MutationError> {
        let mut document = Document::new();
        for component in components {
            let position = document.roots.len() as isize;
            document.insert(
                component,
                &InsertLocation::Parent {
                    component_id: None,
                    position,
                },
            )?;
        }
        Ok(document)
    }

    /// Export the forest as detached nested components.
    pub fn to_components(&self) -> Vec<Component> {
        self.roots
            .iter()
            .filter_map(|id| self.assemble(id))
            .collect()
    }

    /// Detached nested copy of one subtree.
    pub fn component(&self, id: &str) -> Option<Component> {
        self.assemble(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of the top-level components, in order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Find a component by id and describe where it sits.
    pub fn locate(&self, id: &str) -> Option<Location> {
        let node = self.nodes.get(id)?;

        let mut id_path = vec![id.to_string()];
        let mut current = node;
        while let Some(parent_id) = current.parent.as_deref() {
            id_path.push(parent_id.to_string());
            current = self.nodes.get(parent_id)?;
        }
        id_path.reverse();

        let mut index_path = Vec::with_capacity(id_path.len());
        let mut siblings = &self.roots;
        for step in &id_path {
            index_path.push(siblings.iter().position(|sibling| sibling == step)?);
            siblings = &self.nodes.get(step)?.children;
        }

        Some(Location {
            parent: node.parent.clone(),
            index: *index_path.last()?,
            id_path,
            index_path,
        })
    }

    /// Insert a nested component (and its whole subtree) at the given
    /// location. Ordinal positions are clamped into `[0, len]`; out-of-range
    /// positions saturate instead of failing.
    pub fn insert(
        &mut self,
        component: Component,
        location: &InsertLocation,
    ) -> Result<(), MutationError> {
        let (parent, index) = self.resolve_location(location)?;
        self.ensure_fresh_ids(&component)?;

        let id = self.adopt(component, parent.clone());
        self.children_slot(&parent).insert(index, id);
        Ok(())
    }

    /// Remove a subtree from the forest and return it as a detached value.
    pub fn detach(&mut self, id: &str) -> Result<Component, MutationError> {
        let location = self
            .locate(id)
            .ok_or_else(|| MutationError::TargetNotFound(id.to_string()))?;

        self.children_slot(&location.parent).remove(location.index);
        self.extract(id)
            .ok_or_else(|| MutationError::TargetNotFound(id.to_string()))
    }

    /// Shallow-merge a patch into a component. A present `config` replaces
    /// the node's whole map.
    pub fn update(&mut self, id: &str, patch: &ComponentPatch) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| MutationError::TargetNotFound(id.to_string()))?;

        if let Some(version) = &patch.version {
            node.version = version.clone();
        }
        if let Some(config) = &patch.config {
            node.config = config.clone();
        }
        if let Some(internal_name) = &patch.internal_name {
            node.internal_name = Some(internal_name.clone());
        }
        Ok(())
    }

    /// Move a subtree to a new location in one step. The node keeps its id,
    /// and a failed move leaves the forest untouched.
    ///
    /// The target is resolved with the node still attached, so sibling and
    /// ordinal addressing mean "as the document looks right now", matching
    /// insert-then-remove semantics without the intermediate state.
    pub fn relocate(&mut self, id: &str, location: &InsertLocation) -> Result<(), MutationError> {
        let source = self
            .locate(id)
            .ok_or_else(|| MutationError::TargetNotFound(id.to_string()))?;
        let (new_parent, index) = self.resolve_location(location)?;

        if let Some(parent_id) = &new_parent {
            if parent_id == id || self.is_inside(parent_id, id) {
                return Err(MutationError::CycleDetected {
                    component_id: id.to_string(),
                });
            }
        }

        self.children_slot(&source.parent).remove(source.index);

        // The target index was computed with the node still in place;
        // removing it from the same list shifts later positions down by one.
        let mut index = index;
        if new_parent == source.parent && source.index < index {
            index -= 1;
        }
        let slot = self.children_slot(&new_parent);
        let index = index.min(slot.len());
        slot.insert(index, id.to_string());

        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent;
        }
        Ok(())
    }

    /// Resolve an insert location to a parent key and a clamped index,
    /// without modifying anything.
    fn resolve_location(
        &self,
        location: &InsertLocation,
    ) -> Result<(Option<String>, usize), MutationError> {
        match location {
            InsertLocation::Parent {
                component_id: None,
                position,
            } => Ok((None, clamp_position(*position, self.roots.len()))),
            InsertLocation::Parent {
                component_id: Some(parent_id),
                position,
            } => {
                let parent = self
                    .nodes
                    .get(parent_id)
                    .ok_or_else(|| MutationError::TargetNotFound(parent_id.clone()))?;
                Ok((
                    Some(parent_id.clone()),
                    clamp_position(*position, parent.children.len()),
                ))
            }
            // A sibling location with no anchor appends to the root forest.
            InsertLocation::Sibling {
                component_id: None, ..
            } => Ok((None, self.roots.len())),
            InsertLocation::Sibling {
                component_id: Some(anchor_id),
                position,
            } => {
                let anchor = self
                    .locate(anchor_id)
                    .ok_or_else(|| MutationError::TargetNotFound(anchor_id.clone()))?;
                let index = match position {
                    SiblingPosition::Before => anchor.index,
                    SiblingPosition::After => anchor.index + 1,
                };
                Ok((anchor.parent, index))
            }
        }
    }

    /// Reject a subtree whose ids collide with the arena or with each other.
    fn ensure_fresh_ids(&self, component: &Component) -> Result<(), MutationError> {
        let mut seen = HashSet::new();
        let mut stack = vec![component];
        while let Some(current) = stack.pop() {
            if self.nodes.contains_key(&current.id) || !seen.insert(current.id.as_str()) {
                return Err(MutationError::DuplicateId(current.id.clone()));
            }
            stack.extend(current.children.iter());
        }
        Ok(())
    }

    /// Flatten a nested component into the arena. Returns the root id.
    fn adopt(&mut self, component: Component, parent: Option<String>) -> String {
        let Component {
            id,
            component_type,
            version,
            config,
            internal_name,
            children,
        } = component;

        let child_ids = children
            .into_iter()
            .map(|child| self.adopt(child, Some(id.clone())))
            .collect();

        self.nodes.insert(
            id.clone(),
            Node {
                component_type,
                version,
                config,
                internal_name,
                parent,
                children: child_ids,
            },
        );
        id
    }

    /// Remove a subtree from the arena and rebuild it as a nested value.
    fn extract(&mut self, id: &str) -> Option<Component> {
        let node = self.nodes.remove(id)?;
        let children = node
            .children
            .iter()
            .filter_map(|child| self.extract(child))
            .collect();

        Some(Component {
            id: id.to_string(),
            component_type: node.component_type,
            version: node.version,
            config: node.config,
            internal_name: node.internal_name,
            children,
        })
    }

    /// Clone a subtree into a nested value without removing it.
    fn assemble(&self, id: &str) -> Option<Component> {
        let node = self.nodes.get(id)?;
        let children = node
            .children
            .iter()
            .filter_map(|child| self.assemble(child))
            .collect();

        Some(Component {
            id: id.to_string(),
            component_type: node.component_type.clone(),
            version: node.version.clone(),
            config: node.config.clone(),
            internal_name: node.internal_name.clone(),
            children,
        })
    }

    /// True when `id` sits somewhere below `ancestor`.
    fn is_inside(&self, id: &str, ancestor: &str) -> bool {
        let mut current = self.nodes.get(id).and_then(|node| node.parent.as_deref());
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(parent).and_then(|node| node.parent.as_deref());
        }
        false
    }

    /// Child list for a resolved parent key. The key must have been
    /// validated by `resolve_location` or `locate` beforehand.
    fn children_slot(&mut self, parent: &Option<String>) -> &mut Vec<String> {
        match parent {
            None => &mut self.roots,
            Some(id) => {
                &mut self
                    .nodes
                    .get_mut(id)
                    .expect("resolved parent id is present in the arena")
                    .children
            }
        }
    }
}

fn clamp_position(position: isize, len: usize) -> usize {
    position.clamp(0, len as isize) as usize
}
