//! Layout engine — convenience API for full network layout.
//!
//! Phases:
//!   1. Column assignment (longest path from the roots)
//!   2. Slot layout per layer (collapsing large layers)
//!   3. Vertical stacking of layers sharing a column
//!   4. Style resolution per layer
//!   5. Connection routing
//!
//! Layout is a pure function of the graph and the configuration; nothing is
//! cached on the graph.

pub mod columns;
pub mod connections;
pub mod neurons;
pub mod types;

pub use columns::ColumnAssignment;
pub use connections::route_connections;
pub use neurons::layout_slots;
pub use types::{
    Connection, LayerBounds, LayerLayout, LayoutSlot, NetworkLayout, NeuronSlot, Point, SlotRef,
    SlotSource,
};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::network::LayerGraph;
use crate::style::{StyleResolver, StyleWarning};

/// Run the full layout pipeline with the default configuration.
pub fn full_layout(graph: &LayerGraph) -> Result<NetworkLayout> {
    full_layout_with_config(graph, &LayoutConfig::default())
}

/// Run the full layout pipeline with a custom config.
pub fn full_layout_with_config(graph: &LayerGraph, config: &LayoutConfig) -> Result<NetworkLayout> {
    let assignment = ColumnAssignment::assign(graph)?;
    let resolver = StyleResolver::new(&config.styles);

    let mut warnings = Vec::new();
    push_unique(&mut warnings, resolver.unmatched_keys(graph));
    let mut layers: Vec<LayerLayout> = Vec::with_capacity(graph.len());

    for (column, stack) in assignment.stacks.iter().enumerate() {
        let x = config.column_x(column);
        let slot_lists: Vec<Vec<NeuronSlot>> = stack
            .iter()
            .map(|&id| -> Result<Vec<NeuronSlot>> {
                let node = graph.layer(id)?;
                Ok(layout_slots(node.size, &config.collapse, config.numbering_reversed))
            })
            .collect::<Result<_>>()?;

        let heights: Vec<f64> = slot_lists
            .iter()
            .map(|slots| (slots.len() as f64 - 1.0) * config.neuron_spacing)
            .collect();
        let total = heights.iter().sum::<f64>()
            + stack.len().saturating_sub(1) as f64 * config.branch_spacing;
        let mut top = total / 2.0;

        for ((&id, slots), height) in stack.iter().zip(slot_lists).zip(heights) {
            let node = graph.layer(id)?;
            let center_y = top - height / 2.0;
            top -= height + config.branch_spacing;

            let slots = slots
                .into_iter()
                .map(|slot| LayoutSlot {
                    center: Point::new(x, center_y + slot.position * config.neuron_spacing),
                    label: slot
                        .display_index
                        .and_then(|i| node.label(i))
                        .map(str::to_owned),
                    slot,
                })
                .collect();

            let resolution = resolver.resolve(id, node.name.as_deref());
            push_unique(&mut warnings, resolution.warnings);

            layers.push(LayerLayout {
                id,
                name: node.name.clone(),
                size: node.size,
                activation: node.activation.clone(),
                column,
                x,
                center_y,
                label_side: node.labels.side,
                slots,
                style: resolution.style,
            });
        }
    }
    layers.sort_by_key(|l| l.id);

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let connections = route_connections(graph, &layers);
    tracing::debug!(
        layers = layers.len(),
        columns = assignment.column_count(),
        connections = connections.len(),
        "layout complete"
    );

    Ok(NetworkLayout {
        name: graph.name().to_string(),
        column_count: assignment.column_count(),
        layers,
        connections,
        warnings,
    })
}

/// Append warnings not already reported. Layers sharing a global or named
/// override would otherwise repeat the same warning once per layer.
fn push_unique(warnings: &mut Vec<StyleWarning>, new: Vec<StyleWarning>) {
    for warning in new {
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_engine.rs"]
mod tests;
