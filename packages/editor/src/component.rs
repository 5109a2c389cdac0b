use mosaic_catalog::ConfigMap;
use serde::{Deserialize, Serialize};

/// A live node in the document forest.
///
/// This is the exchange shape: the nested record embedders persist, load,
/// and receive from [`crate::EditSession::document`]. Inside the store the
/// forest is held flat (see [`crate::Document`]); nested values like this one
/// are always detached copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Stable identity, unique within the document for the node's lifetime.
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    /// Version of the definition this node was instantiated from. Empty for
    /// preserved nodes of unknown type that never declared one.
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub config: ConfigMap,
    /// Free-form name carried by template children such as tabs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
}

/// Fields updatable on a live component.
///
/// Merging is shallow: a present field overwrites the node's value, and a
/// present `config` replaces the whole map rather than deep-merging into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
}

impl ComponentPatch {
    pub fn config(config: ConfigMap) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }
}
