//! nnplot — layer-graph model and deterministic 2-D layout for neural network
//! diagrams.
//!
//! Public API: `layout_network()` and `layout_description()`.
//! Pipeline: `LayerGraph` → column assignment → slot layout → connection
//! routing, with styles resolved per layer. Drawing is left to the caller.

pub mod config;
pub mod description;
pub mod error;
pub mod layout;
pub mod network;
pub mod style;

pub use crate::config::{CollapseConfig, LayoutConfig};
pub use crate::error::{GraphError, Result};
pub use crate::layout::NetworkLayout;
pub use crate::network::{LabelSide, LayerGraph, LayerId, LayerNode, NeuronLabels};

use crate::description::{DescriptionError, NetworkDescription};
use crate::layout::full_layout_with_config;

/// Lay out `graph` with `config`.
pub fn layout_network(graph: &LayerGraph, config: &LayoutConfig) -> Result<NetworkLayout> {
    full_layout_with_config(graph, config)
}

/// Parse a JSON network description and lay it out with its own config.
pub fn layout_description(src: &str) -> std::result::Result<NetworkLayout, DescriptionError> {
    let description = NetworkDescription::from_json(src)?;
    let graph = description.build_graph()?;
    Ok(full_layout_with_config(&graph, &description.config)?)
}
