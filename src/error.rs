//! Error types for graph construction and layout.
//!
//! Structural errors (bad references, cycles, missing layers) are fatal and
//! returned immediately. Cosmetic problems (style keys, colours, collapse
//! thresholds) never surface here; they degrade inside the layout instead.

use thiserror::Error;

use crate::network::types::LayerId;

/// Result type alias for graph and layout operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid reference: parent layer {id} does not exist")]
    InvalidReference { id: LayerId },

    #[error("edge {parent} -> {child} would create a cycle")]
    CycleDetected { parent: LayerId, child: LayerId },

    #[error("unknown layer {id}")]
    UnknownLayer { id: LayerId },

    #[error("layer name '{name}' is ambiguous ({count} layers share it)")]
    AmbiguousName { name: String, count: usize },

    #[error("no layer named '{name}'")]
    NotFound { name: String },

    #[error("layer graph is not acyclic")]
    NotAcyclic,

    #[error("layer size must be at least 1 (got {size})")]
    InvalidLayerSize { size: usize },

    #[error("expected {expected} neuron labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
}
