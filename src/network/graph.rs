//! LayerGraph — the layer DAG backing every layout.
//!
//! Wraps a petgraph `StableDiGraph` (indices survive removals) together with
//! an id → index map, the insertion cursor used for sequential auto-linking,
//! and maintained root/leaf sets.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::Direction;
use petgraph::algo::{has_path_connecting, toposort};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use super::types::{LayerId, LayerNode, NeuronLabels};
use crate::error::{GraphError, Result};

/// Directed acyclic graph of layers.
///
/// Edges point from parent to child. The graph owns every `LayerNode`; callers
/// only ever hold `LayerId`s.
#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    name: String,
    digraph: StableDiGraph<LayerId, ()>,
    /// Maps layer id → petgraph NodeIndex.
    node_index: HashMap<LayerId, NodeIndex>,
    /// Ordered by id, which is also insertion order.
    layers: BTreeMap<LayerId, LayerNode>,
    roots: BTreeSet<LayerId>,
    leaves: BTreeSet<LayerId>,
    /// Most recently added layer still present; target of the sequential default.
    cursor: Option<LayerId>,
    next_id: u64,
}

impl LayerGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ─── Mutation ────────────────────────────────────────────────────────────

    /// Add a layer linked to `parents`.
    ///
    /// With no parents given, the layer is linked to the most recently added
    /// layer (if any). On error the graph is left untouched and no id is spent.
    pub fn add_layer(&mut self, node: LayerNode, parents: &[LayerId]) -> Result<LayerId> {
        let mut parent_ids: Vec<LayerId> = Vec::with_capacity(parents.len().max(1));
        if parents.is_empty() {
            parent_ids.extend(self.cursor);
        } else {
            for &p in parents {
                if !parent_ids.contains(&p) {
                    parent_ids.push(p);
                }
            }
        }
        self.insert(node, parent_ids)
    }

    /// Add a layer with no parents, bypassing the sequential default.
    pub fn add_root(&mut self, node: LayerNode) -> Result<LayerId> {
        self.insert(node, Vec::new())
    }

    fn insert(&mut self, node: LayerNode, parent_ids: Vec<LayerId>) -> Result<LayerId> {
        validate_node(&node)?;
        for &p in &parent_ids {
            if !self.node_index.contains_key(&p) {
                return Err(GraphError::InvalidReference { id: p });
            }
        }

        let id = LayerId(self.next_id);
        let idx = self.digraph.add_node(id);
        for &p in &parent_ids {
            if let Err(e) = self.ensure_acyclic(self.node_index[&p], idx, p, id) {
                self.digraph.remove_node(idx);
                return Err(e);
            }
        }

        self.next_id += 1;
        self.node_index.insert(id, idx);
        self.layers.insert(id, node);
        for &p in &parent_ids {
            self.digraph.add_edge(self.node_index[&p], idx, ());
        }
        self.refresh_membership(id);
        for &p in &parent_ids {
            self.refresh_membership(p);
        }
        self.cursor = Some(id);
        tracing::trace!(layer = %id, parents = parent_ids.len(), "added layer");
        Ok(id)
    }

    /// Remove a layer and every edge touching it.
    ///
    /// Orphaned children are not relinked to grandparents; they simply become
    /// roots if they have no other parent.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<LayerNode> {
        let idx = self.index_of(id)?;
        let neighbours: Vec<LayerId> = self
            .digraph
            .neighbors_undirected(idx)
            .map(|n| self.digraph[n])
            .collect();

        self.digraph.remove_node(idx);
        self.node_index.remove(&id);
        self.roots.remove(&id);
        self.leaves.remove(&id);
        let node = self
            .layers
            .remove(&id)
            .ok_or(GraphError::UnknownLayer { id })?;

        for n in neighbours {
            self.refresh_membership(n);
        }
        if self.cursor == Some(id) {
            self.cursor = self.layers.keys().next_back().copied();
        }
        tracing::trace!(layer = %id, "removed layer");
        Ok(node)
    }

    /// Add an edge between two existing layers. Adding an existing edge is a no-op.
    pub fn connect(&mut self, parent: LayerId, child: LayerId) -> Result<()> {
        let p_idx = self.index_of(parent)?;
        let c_idx = self.index_of(child)?;
        if self.digraph.find_edge(p_idx, c_idx).is_some() {
            return Ok(());
        }
        self.ensure_acyclic(p_idx, c_idx, parent, child)?;
        self.digraph.add_edge(p_idx, c_idx, ());
        self.refresh_membership(parent);
        self.refresh_membership(child);
        Ok(())
    }

    /// Remove the edge `parent → child`. Returns whether an edge was removed.
    pub fn disconnect(&mut self, parent: LayerId, child: LayerId) -> Result<bool> {
        let p_idx = self.index_of(parent)?;
        let c_idx = self.index_of(child)?;
        let Some(edge) = self.digraph.find_edge(p_idx, c_idx) else {
            return Ok(false);
        };
        self.digraph.remove_edge(edge);
        self.refresh_membership(parent);
        self.refresh_membership(child);
        Ok(true)
    }

    pub fn rename_layer(&mut self, id: LayerId, name: Option<String>) -> Result<()> {
        let node = self
            .layers
            .get_mut(&id)
            .ok_or(GraphError::UnknownLayer { id })?;
        node.name = name;
        Ok(())
    }

    pub fn set_labels(&mut self, id: LayerId, labels: NeuronLabels) -> Result<()> {
        let node = self
            .layers
            .get_mut(&id)
            .ok_or(GraphError::UnknownLayer { id })?;
        check_label_count(node.size, &labels)?;
        node.labels = labels;
        Ok(())
    }

    // ─── Queries ─────────────────────────────────────────────────────────────

    pub fn layer(&self, id: LayerId) -> Result<&LayerNode> {
        self.layers.get(&id).ok_or(GraphError::UnknownLayer { id })
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    /// Look up the single layer carrying `name`.
    pub fn layer_id_by_name(&self, name: &str) -> Result<LayerId> {
        let matches = self.layer_ids_by_name(name);
        match matches.as_slice() {
            [] => Err(GraphError::NotFound {
                name: name.to_string(),
            }),
            [id] => Ok(*id),
            _ => Err(GraphError::AmbiguousName {
                name: name.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// All layers carrying `name`, in insertion order.
    pub fn layer_ids_by_name(&self, name: &str) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|(_, node)| node.name.as_deref() == Some(name))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Parent ids of `id`, sorted.
    pub fn parents(&self, id: LayerId) -> Result<Vec<LayerId>> {
        self.neighbours(id, Direction::Incoming)
    }

    /// Child ids of `id`, sorted.
    pub fn children(&self, id: LayerId) -> Result<Vec<LayerId>> {
        self.neighbours(id, Direction::Outgoing)
    }

    /// Layers without parents.
    pub fn roots(&self) -> &BTreeSet<LayerId> {
        &self.roots
    }

    /// Layers without children.
    pub fn leaves(&self) -> &BTreeSet<LayerId> {
        &self.leaves
    }

    /// True iff every layer has at most one parent and at most one child.
    pub fn is_linear(&self) -> bool {
        self.digraph.node_indices().all(|idx| {
            self.degree(idx, Direction::Incoming) <= 1 && self.degree(idx, Direction::Outgoing) <= 1
        })
    }

    /// Layer ids in insertion order.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.keys().copied()
    }

    /// `(id, node)` pairs in insertion order.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &LayerNode)> + '_ {
        self.layers.iter().map(|(id, node)| (*id, node))
    }

    /// All edges as `(parent, child)` pairs, sorted.
    pub fn edges(&self) -> Vec<(LayerId, LayerId)> {
        let mut edges: Vec<(LayerId, LayerId)> = self
            .digraph
            .edge_indices()
            .filter_map(|e| self.digraph.edge_endpoints(e))
            .map(|(a, b)| (self.digraph[a], self.digraph[b]))
            .collect();
        edges.sort();
        edges
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// The layer a new parentless layer would be linked to.
    pub fn cursor(&self) -> Option<LayerId> {
        self.cursor
    }

    /// Topological order of layer ids (parents before children).
    pub fn topological_order(&self) -> Result<Vec<LayerId>> {
        toposort(&self.digraph, None)
            .map(|order| order.into_iter().map(|idx| self.digraph[idx]).collect())
            .map_err(|_| GraphError::NotAcyclic)
    }

    // ─── Private helpers ─────────────────────────────────────────────────────

    fn index_of(&self, id: LayerId) -> Result<NodeIndex> {
        self.node_index
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownLayer { id })
    }

    /// Fails if adding `parent → child` would close a cycle, i.e. if `child`
    /// already reaches `parent`.
    fn ensure_acyclic(
        &self,
        p_idx: NodeIndex,
        c_idx: NodeIndex,
        parent: LayerId,
        child: LayerId,
    ) -> Result<()> {
        if p_idx == c_idx || has_path_connecting(&self.digraph, c_idx, p_idx, None) {
            return Err(GraphError::CycleDetected { parent, child });
        }
        Ok(())
    }

    fn neighbours(&self, id: LayerId, dir: Direction) -> Result<Vec<LayerId>> {
        let idx = self.index_of(id)?;
        let mut ids: Vec<LayerId> = self
            .digraph
            .neighbors_directed(idx, dir)
            .map(|n| self.digraph[n])
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn degree(&self, idx: NodeIndex, dir: Direction) -> usize {
        self.digraph.neighbors_directed(idx, dir).count()
    }

    /// Recompute root/leaf membership for one layer from its current degree.
    fn refresh_membership(&mut self, id: LayerId) {
        let Some(&idx) = self.node_index.get(&id) else {
            return;
        };
        if self.degree(idx, Direction::Incoming) == 0 {
            self.roots.insert(id);
        } else {
            self.roots.remove(&id);
        }
        if self.degree(idx, Direction::Outgoing) == 0 {
            self.leaves.insert(id);
        } else {
            self.leaves.remove(&id);
        }
    }
}

fn validate_node(node: &LayerNode) -> Result<()> {
    if node.size == 0 {
        return Err(GraphError::InvalidLayerSize { size: node.size });
    }
    check_label_count(node.size, &node.labels)
}

fn check_label_count(size: usize, labels: &NeuronLabels) -> Result<()> {
    if !labels.is_empty() && labels.len() != size {
        return Err(GraphError::LabelCountMismatch {
            expected: size,
            actual: labels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/rust/test_network_graph.rs"]
mod tests;
