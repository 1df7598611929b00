//! Layout types: Point, NeuronSlot, LayerLayout, Connection, NetworkLayout.
//!
//! Coordinates use a y-up convention: the first slot of a layer is its
//! topmost one and has the largest y.

use serde::Serialize;

use crate::network::{LabelSide, LayerId};
use crate::style::{EffectiveStyle, StyleWarning};

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ─── NeuronSlot ──────────────────────────────────────────────────────────────

/// What a slot stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSource {
    /// A real neuron.
    Neuron { index: usize },
    /// Placeholder for the omitted neurons `first..=last`.
    Collapsed { first: usize, last: usize },
}

/// One vertical position within a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeuronSlot {
    /// Offset from the layer centre in slot units, positive upwards.
    pub position: f64,
    pub source: SlotSource,
    /// Index shown next to the neuron; depends on the numbering direction.
    pub display_index: Option<usize>,
}

impl NeuronSlot {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.source, SlotSource::Collapsed { .. })
    }

    /// Index of the neuron this slot draws, or None for a placeholder.
    pub fn neuron_index(&self) -> Option<usize> {
        match self.source {
            SlotSource::Neuron { index } => Some(index),
            SlotSource::Collapsed { .. } => None,
        }
    }
}

/// A slot placed in diagram coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSlot {
    #[serde(flatten)]
    pub slot: NeuronSlot,
    pub center: Point,
    /// Custom neuron label text, if the layer has labels.
    pub label: Option<String>,
}

// ─── LayerLayout ─────────────────────────────────────────────────────────────

/// Vertical extent of a layer's slot centres at its column x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerBounds {
    pub x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Geometry and resolved style of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerLayout {
    pub id: LayerId,
    pub name: Option<String>,
    pub size: usize,
    pub activation: Option<String>,
    pub column: usize,
    pub x: f64,
    pub center_y: f64,
    pub label_side: LabelSide,
    pub slots: Vec<LayoutSlot>,
    pub style: EffectiveStyle,
}

impl LayerLayout {
    pub fn is_collapsed(&self) -> bool {
        self.slots.iter().any(|s| s.slot.is_placeholder())
    }

    /// The collapse marker (ellipsis), if this layer is collapsed.
    pub fn placeholder(&self) -> Option<&LayoutSlot> {
        self.slots.iter().find(|s| s.slot.is_placeholder())
    }

    /// `(slot position in layer, slot)` for every real neuron slot.
    pub fn real_slots(&self) -> impl Iterator<Item = (usize, &LayoutSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.slot.is_placeholder())
    }

    pub fn bounds(&self) -> LayerBounds {
        let (min_y, max_y) = self
            .slots
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.center.y), hi.max(s.center.y))
            });
        LayerBounds {
            x: self.x,
            min_y,
            max_y,
        }
    }
}

// ─── Connection ──────────────────────────────────────────────────────────────

/// Reference to one slot of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlotRef {
    pub layer: LayerId,
    /// Position of the slot within the layer's slot list.
    pub slot: usize,
}

/// A straight segment between two real neuron slots. Styled by the source
/// layer's connection style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    pub from: SlotRef,
    pub to: SlotRef,
    pub start: Point,
    pub end: Point,
}

// ─── NetworkLayout ───────────────────────────────────────────────────────────

/// The full output of the layout pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkLayout {
    pub name: String,
    pub column_count: usize,
    /// In layer insertion order.
    pub layers: Vec<LayerLayout>,
    pub connections: Vec<Connection>,
    pub warnings: Vec<StyleWarning>,
}

impl NetworkLayout {
    pub fn layer(&self, id: LayerId) -> Option<&LayerLayout> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Connections whose source is `id`.
    pub fn connections_from(&self, id: LayerId) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter().filter(move |c| c.from.layer == id)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
