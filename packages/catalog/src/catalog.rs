use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::ComponentDefinition;
use crate::version::Version;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The component definition registry.
///
/// Read-only after construction. Definitions keep their load order, which is
/// significant: when duplicate `(type, version)` entries exist, the first one
/// wins, and equal-version candidates for a highest-version lookup resolve to
/// the first seen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    definitions: Vec<ComponentDefinition>,
}

impl Catalog {
    pub fn from_definitions(definitions: Vec<ComponentDefinition>) -> Self {
        Self { definitions }
    }

    /// Load a catalog from the JSON array a schema source supplies at startup.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let definitions = serde_json::from_str(raw)?;
        Ok(Self { definitions })
    }

    pub fn definitions(&self) -> &[ComponentDefinition] {
        &self.definitions
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Look up a definition by type, either pinned to an exact version or,
    /// when `version` is `None`, the highest version available for the type.
    pub fn resolve(
        &self,
        component_type: &str,
        version: Option<&str>,
    ) -> Option<&ComponentDefinition> {
        match version {
            Some(version) => self
                .definitions
                .iter()
                .find(|def| def.component_type == component_type && def.version == version),
            None => {
                let mut best: Option<(&ComponentDefinition, Version)> = None;
                for def in &self.definitions {
                    if def.component_type != component_type {
                        continue;
                    }
                    let parsed = Version::parse(&def.version);
                    match best {
                        // Earlier entries win ties.
                        Some((_, current)) if parsed <= current => {}
                        _ => best = Some((def, parsed)),
                    }
                }
                best.map(|(def, _)| def)
            }
        }
    }
}
