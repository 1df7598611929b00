use super::*;
use crate::config::{CollapseConfig, LayoutConfig};
use crate::layout::full_layout_with_config;
use crate::network::LayerNode;

fn config(collapse: CollapseConfig) -> LayoutConfig {
    LayoutConfig {
        collapse,
        ..LayoutConfig::default()
    }
}

fn two_layers(from: usize, to: usize) -> (LayerGraph, LayerId, LayerId) {
    let mut g = LayerGraph::new("pair");
    let a = g.add_layer(LayerNode::named("A", from), &[]).unwrap();
    let b = g.add_layer(LayerNode::named("B", to), &[]).unwrap();
    (g, a, b)
}

#[test]
fn test_full_bipartite_without_collapsing() {
    let (g, _, _) = two_layers(4, 3);
    let layout = full_layout_with_config(&g, &LayoutConfig::default()).unwrap();
    let connections = route_connections(&g, &layout.layers);
    assert_eq!(connections.len(), 12);
}

#[test]
fn test_placeholder_slots_get_no_connections() {
    // 4 neurons collapse to 2 real, 1 placeholder, 1 real.
    let (g, a, _) = two_layers(4, 3);
    let layout = full_layout_with_config(&g, &config(CollapseConfig::new(3, 2, 1))).unwrap();
    let source = layout.layer(a).unwrap();
    assert_eq!(source.slots.len(), 4);
    assert!(source.slots[2].slot.is_placeholder());

    let connections = route_connections(&g, &layout.layers);
    assert_eq!(connections.len(), 9);
    assert!(connections.iter().all(|c| c.from.slot != 2));
}

#[test]
fn test_collapsing_bounds_segment_count() {
    let (g, _, _) = two_layers(1000, 1000);
    let layout = full_layout_with_config(&g, &config(CollapseConfig::new(20, 10, 9))).unwrap();
    assert_eq!(layout.connections.len(), 19 * 19);
}

#[test]
fn test_segment_order_and_endpoints() {
    let (g, a, b) = two_layers(2, 2);
    let layout = full_layout_with_config(&g, &LayoutConfig::default()).unwrap();
    let connections = route_connections(&g, &layout.layers);
    let pairs: Vec<(usize, usize)> = connections.iter().map(|c| (c.from.slot, c.to.slot)).collect();
    assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

    let src = layout.layer(a).unwrap();
    let dst = layout.layer(b).unwrap();
    assert_eq!(connections[1].start, src.slots[0].center);
    assert_eq!(connections[1].end, dst.slots[1].center);
    assert!(connections.iter().all(|c| c.from.layer == a && c.to.layer == b));
}

#[test]
fn test_branching_edges_each_routed() {
    let mut g = LayerGraph::new("heads");
    let hidden = g.add_layer(LayerNode::named("Hidden", 3), &[]).unwrap();
    let head1 = g.add_layer(LayerNode::named("Head1", 2), &[hidden]).unwrap();
    let head2 = g.add_layer(LayerNode::named("Head2", 1), &[hidden]).unwrap();
    let layout = full_layout_with_config(&g, &LayoutConfig::default()).unwrap();
    let connections = route_connections(&g, &layout.layers);
    assert_eq!(connections.len(), 3 * 2 + 3);
    assert_eq!(connections.iter().filter(|c| c.to.layer == head1).count(), 6);
    assert_eq!(connections.iter().filter(|c| c.to.layer == head2).count(), 3);
}

#[test]
fn test_missing_layer_geometry_is_skipped() {
    let (g, a, _) = two_layers(2, 2);
    let layout = full_layout_with_config(&g, &LayoutConfig::default()).unwrap();
    let only_source: Vec<LayerLayout> = layout.layers.into_iter().filter(|l| l.id == a).collect();
    assert!(route_connections(&g, &only_source).is_empty());
}
