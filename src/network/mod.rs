//! Network topology: layer records and the layer DAG.

pub mod graph;
pub mod types;

pub use graph::LayerGraph;
pub use types::{LabelSide, LayerId, LayerNode, NeuronLabels};
