//! # Instantiation
//!
//! Turns catalog definitions and child templates into live components:
//! fresh stable identity, an isolated copy of the default config, and the
//! definition's default children expanded recursively, each child
//! re-resolving its own type and version against the catalog.

use mosaic_catalog::{Catalog, ChildTemplate, ComponentDefinition};
use uuid::Uuid;

use crate::component::Component;
use crate::mutations::MutationError;

/// Allocate a fresh component identity.
pub(crate) fn new_component_id() -> String {
    format!("comp_{}", Uuid::new_v4())
}

/// Build a live component from a resolved definition.
///
/// The config is a copy of the definition's defaults, never the same map,
/// so mutating the instance can't touch the definition or its siblings.
pub fn instantiate(
    definition: &ComponentDefinition,
    catalog: &Catalog,
) -> Result<Component, MutationError> {
    Ok(Component {
        id: new_component_id(),
        component_type: definition.component_type.clone(),
        version: definition.version.clone(),
        config: definition.default_config.clone(),
        internal_name: None,
        children: expand_children(&definition.default_children, catalog)?,
    })
}

fn expand_children(
    templates: &[ChildTemplate],
    catalog: &Catalog,
) -> Result<Vec<Component>, MutationError> {
    templates
        .iter()
        .map(|template| expand_template(template, catalog))
        .collect()
}

/// Expand one child template into a live component.
///
/// The template's type resolves against the catalog (highest version when
/// none is declared). Literal config and children on the template override
/// the resolved definition's defaults. Types the catalog doesn't know are
/// preserved verbatim with a fresh id, so legacy documents keep their nodes
/// instead of dropping them.
pub fn expand_template(
    template: &ChildTemplate,
    catalog: &Catalog,
) -> Result<Component, MutationError> {
    let component_type = template
        .component_type
        .as_deref()
        .filter(|component_type| !component_type.is_empty())
        .ok_or_else(|| {
            MutationError::InvalidChildSpec("child template is missing a component type".into())
        })?;

    let Some(definition) = catalog.resolve(component_type, template.version.as_deref()) else {
        tracing::warn!(component_type, "unknown component type in child template, preserving verbatim");
        return preserve_unknown(template, catalog);
    };

    let children = match &template.children {
        Some(children) => expand_children(children, catalog)?,
        None => expand_children(&definition.default_children, catalog)?,
    };

    Ok(Component {
        id: new_component_id(),
        component_type: definition.component_type.clone(),
        version: definition.version.clone(),
        config: template
            .config
            .clone()
            .unwrap_or_else(|| definition.default_config.clone()),
        internal_name: template.internal_name.clone(),
        children,
    })
}

/// Copy an unresolvable template as-is, assigning fresh ids down the tree.
fn preserve_unknown(
    template: &ChildTemplate,
    catalog: &Catalog,
) -> Result<Component, MutationError> {
    let children = match &template.children {
        Some(children) => expand_children(children, catalog)?,
        None => Vec::new(),
    };

    Ok(Component {
        id: new_component_id(),
        component_type: template.component_type.clone().unwrap_or_default(),
        version: template.version.clone().unwrap_or_default(),
        config: template.config.clone().unwrap_or_default(),
        internal_name: template.internal_name.clone(),
        children,
    })
}
