//! Configuration for the layout pipeline.
//!
//! All fields have defaults, so a description file only needs to name the
//! values it changes.

use serde::{Deserialize, Serialize};

use crate::style::StyleConfig;

// ─── CollapseConfig ──────────────────────────────────────────────────────────

/// Thresholds for replacing the middle of a large layer with a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseConfig {
    /// Layers with more neurons than this are collapsed.
    pub max_per_layer: usize,
    /// Real neurons kept above the placeholder.
    pub collapse_start: usize,
    /// Real neurons kept below the placeholder.
    pub collapse_end: usize,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            max_per_layer: 20,
            collapse_start: 10,
            collapse_end: 9,
        }
    }
}

impl CollapseConfig {
    pub fn new(max_per_layer: usize, collapse_start: usize, collapse_end: usize) -> Self {
        Self {
            max_per_layer,
            collapse_start,
            collapse_end,
        }
    }

    /// Whether a layer of `size` neurons is drawn collapsed. Thresholds that
    /// would keep every neuron visible never collapse, nor do thresholds whose
    /// sum overflows.
    pub fn collapses(&self, size: usize) -> bool {
        size > self.max_per_layer && self.shown().is_some_and(|shown| shown < size)
    }

    /// Real neurons kept by a collapsed layer.
    pub fn shown(&self) -> Option<usize> {
        self.collapse_start.checked_add(self.collapse_end)
    }
}

// ─── LayoutConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between adjacent columns.
    pub layer_spacing: f64,
    /// Vertical distance between adjacent slots of one layer.
    pub neuron_spacing: f64,
    /// Uniform scale applied to column positions.
    pub spacing_multiplier: f64,
    /// Vertical gap between layers stacked in the same column.
    pub branch_spacing: f64,
    pub collapse: CollapseConfig,
    /// true: display numbering and labels run top-to-bottom.
    /// false: they run bottom-to-top. Physical slot order is unaffected.
    pub numbering_reversed: bool,
    pub styles: StyleConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_spacing: 3.0,
            neuron_spacing: 1.0,
            spacing_multiplier: 1.0,
            branch_spacing: 2.0,
            collapse: CollapseConfig::default(),
            numbering_reversed: false,
            styles: StyleConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// x coordinate of a column.
    pub fn column_x(&self, column: usize) -> f64 {
        column as f64 * self.layer_spacing * self.spacing_multiplier
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
