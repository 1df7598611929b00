//! Column assignment — the horizontal axis of the diagram.
//!
//! A root sits in column 0; every other layer sits one column right of its
//! deepest parent (longest path from a source).

use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::network::{LayerGraph, LayerId};

pub struct ColumnAssignment {
    pub columns: HashMap<LayerId, usize>,
    /// Layers of each column, top to bottom, in insertion order.
    pub stacks: Vec<Vec<LayerId>>,
}

impl ColumnAssignment {
    pub fn assign(graph: &LayerGraph) -> Result<Self> {
        let order = graph.topological_order()?;

        let mut columns: HashMap<LayerId, usize> = HashMap::with_capacity(order.len());
        for &id in &order {
            let mut column = 0;
            for parent in graph.parents(id)? {
                // Topological order guarantees parents are already placed.
                let parent_column = *columns.get(&parent).ok_or(GraphError::NotAcyclic)?;
                column = column.max(parent_column + 1);
            }
            columns.insert(id, column);
        }

        let column_count = columns.values().copied().max().map_or(0, |c| c + 1);
        let mut stacks: Vec<Vec<LayerId>> = vec![Vec::new(); column_count];
        for id in graph.layer_ids() {
            stacks[columns[&id]].push(id);
        }

        tracing::debug!(layers = order.len(), columns = column_count, "assigned columns");
        Ok(Self { columns, stacks })
    }

    pub fn column_count(&self) -> usize {
        self.stacks.len()
    }

    pub fn column_of(&self, id: LayerId) -> Option<usize> {
        self.columns.get(&id).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_columns.rs"]
mod tests;
