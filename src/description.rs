//! Network description files.
//!
//! A description is a JSON document listing layers in insertion order. Each
//! layer names its parents; a layer without a `parents` entry follows the
//! previous one, and `"parents": []` makes it an extra root.
//!
//! ```json
//! {
//!   "name": "policy_network",
//!   "layers": [
//!     { "name": "Input", "size": 6, "label_side": "left" },
//!     { "name": "Hidden", "size": 300, "activation": "relu" },
//!     { "name": "Head_1", "size": 7, "parents": ["Hidden"] },
//!     { "name": "Head_2", "size": 7, "parents": ["Hidden"] }
//!   ],
//!   "config": { "collapse": { "max_per_layer": 8, "collapse_start": 4, "collapse_end": 4 } }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LayoutConfig;
use crate::error::GraphError;
use crate::network::{LabelSide, LayerGraph, LayerId, LayerNode, NeuronLabels};

#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("cannot read description: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layer {layer}: {source}")]
    Layer {
        layer: usize,
        #[source]
        source: GraphError,
    },

    #[error("layout failed: {0}")]
    Layout(#[from] GraphError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescription {
    #[serde(default)]
    pub name: Option<String>,
    pub size: usize,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub label_side: LabelSide,
    #[serde(default)]
    pub activation: Option<String>,
    /// Parent layer names. Absent: link to the previous layer. Empty: root.
    #[serde(default)]
    pub parents: Option<Vec<String>>,
}

impl LayerDescription {
    fn to_node(&self) -> LayerNode {
        LayerNode {
            name: self.name.clone(),
            size: self.size,
            labels: NeuronLabels::new(self.labels.iter().cloned(), self.label_side),
            activation: self.activation.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    #[serde(default)]
    pub name: String,
    pub layers: Vec<LayerDescription>,
    #[serde(default)]
    pub config: LayoutConfig,
}

impl NetworkDescription {
    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DescriptionError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build the layer graph. Parent names must resolve to exactly one layer
    /// defined earlier in the list.
    pub fn build_graph(&self) -> Result<LayerGraph, DescriptionError> {
        let mut graph = LayerGraph::new(self.name.clone());
        for (position, layer) in self.layers.iter().enumerate() {
            let wrap = |source| DescriptionError::Layer {
                layer: position,
                source,
            };
            let node = layer.to_node();
            match &layer.parents {
                None => graph.add_layer(node, &[]).map_err(wrap)?,
                Some(names) if names.is_empty() => graph.add_root(node).map_err(wrap)?,
                Some(names) => {
                    let parents = names
                        .iter()
                        .map(|n| graph.layer_id_by_name(n))
                        .collect::<Result<Vec<LayerId>, GraphError>>()
                        .map_err(wrap)?;
                    graph.add_layer(node, &parents).map_err(wrap)?
                }
            };
        }
        Ok(graph)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_description.rs"]
mod tests;
