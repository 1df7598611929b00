//! Layer records stored in the topology graph.
//!
//! `LayerNode` describes one layer (neuron count plus optional metadata).
//! Identity is a `LayerId` handed out by `LayerGraph` when the node is added.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── LayerId ─────────────────────────────────────────────────────────────────

/// Stable identifier for a layer. Ids are never reused within a graph, even
/// after the layer they named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─── LabelSide ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    #[default]
    Left,
    Right,
}

// ─── NeuronLabels ────────────────────────────────────────────────────────────

/// Per-neuron text labels. Either empty or exactly one entry per neuron.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NeuronLabels {
    pub texts: Vec<String>,
    #[serde(default)]
    pub side: LabelSide,
}

impl NeuronLabels {
    pub fn new<I, S>(texts: I, side: LabelSide) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            side,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }
}

// ─── LayerNode ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerNode {
    /// Optional display name. Not required to be unique.
    pub name: Option<String>,
    /// Neuron count, at least 1.
    pub size: usize,
    pub labels: NeuronLabels,
    /// Activation tag shown by renderers (e.g. "relu"). Purely descriptive.
    pub activation: Option<String>,
}

impl LayerNode {
    pub fn new(size: usize) -> Self {
        Self {
            name: None,
            size,
            labels: NeuronLabels::default(),
            activation: None,
        }
    }

    /// Create a named layer.
    pub fn named(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(size)
        }
    }

    pub fn with_labels(mut self, labels: NeuronLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_activation(mut self, activation: impl Into<String>) -> Self {
        self.activation = Some(activation.into());
        self
    }

    /// Label text for neuron `index`, if labels were given.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.texts.get(index).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_network_types.rs"]
mod tests;
