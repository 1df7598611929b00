//! Connection routing between layers.
//!
//! Every layer edge is drawn fully connected between the real slots of both
//! layers. Collapse placeholders take part in no connection.

use std::collections::HashMap;

use super::types::{Connection, LayerLayout, SlotRef};
use crate::network::{LayerGraph, LayerId};

/// Route all connections of `graph` over the already placed `layers`.
///
/// Edges are visited in `(parent, child)` order; within an edge, parent slots
/// run top to bottom and, for each, child slots top to bottom.
pub fn route_connections(graph: &LayerGraph, layers: &[LayerLayout]) -> Vec<Connection> {
    let by_id: HashMap<LayerId, &LayerLayout> = layers.iter().map(|l| (l.id, l)).collect();

    let mut connections = Vec::new();
    for (parent, child) in graph.edges() {
        let (Some(from), Some(to)) = (by_id.get(&parent), by_id.get(&child)) else {
            continue;
        };
        connect_layers(from, to, &mut connections);
    }
    tracing::debug!(count = connections.len(), "routed connections");
    connections
}

/// Emit one segment per (real parent slot, real child slot) pair.
pub fn connect_layers(from: &LayerLayout, to: &LayerLayout, out: &mut Vec<Connection>) {
    for (i, src) in from.real_slots() {
        for (j, dst) in to.real_slots() {
            out.push(Connection {
                from: SlotRef {
                    layer: from.id,
                    slot: i,
                },
                to: SlotRef {
                    layer: to.id,
                    slot: j,
                },
                start: src.center,
                end: dst.center,
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_connections.rs"]
mod tests;
