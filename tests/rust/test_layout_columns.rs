use super::*;
use crate::network::LayerNode;

fn layer(name: &str) -> LayerNode {
    LayerNode::named(name, 2)
}

#[test]
fn test_empty_graph_has_no_columns() {
    let g = LayerGraph::new("empty");
    let ca = ColumnAssignment::assign(&g).unwrap();
    assert_eq!(ca.column_count(), 0);
    assert!(ca.columns.is_empty());
}

#[test]
fn test_linear_chain_columns() {
    let mut g = LayerGraph::new("chain");
    let a = g.add_layer(layer("A"), &[]).unwrap();
    let b = g.add_layer(layer("B"), &[]).unwrap();
    let c = g.add_layer(layer("C"), &[]).unwrap();
    let ca = ColumnAssignment::assign(&g).unwrap();
    assert_eq!(ca.column_of(a), Some(0));
    assert_eq!(ca.column_of(b), Some(1));
    assert_eq!(ca.column_of(c), Some(2));
    assert_eq!(ca.column_count(), 3);
}

#[test]
fn test_branches_share_a_column_in_insertion_order() {
    let mut g = LayerGraph::new("heads");
    let input = g.add_layer(layer("Input"), &[]).unwrap();
    let hidden = g.add_layer(layer("Hidden"), &[input]).unwrap();
    let head1 = g.add_layer(layer("Head1"), &[hidden]).unwrap();
    let head2 = g.add_layer(layer("Head2"), &[hidden]).unwrap();
    let ca = ColumnAssignment::assign(&g).unwrap();
    assert_eq!(ca.stacks, vec![vec![input], vec![hidden], vec![head1, head2]]);
}

#[test]
fn test_column_is_one_past_deepest_parent() {
    // A → B → C and A → C: C sits after B, not next to A.
    let mut g = LayerGraph::new("skip");
    let a = g.add_layer(layer("A"), &[]).unwrap();
    let b = g.add_layer(layer("B"), &[]).unwrap();
    let c = g.add_layer(layer("C"), &[a, b]).unwrap();
    let ca = ColumnAssignment::assign(&g).unwrap();
    assert_eq!(ca.column_of(c), Some(2));
}

#[test]
fn test_multiple_roots_start_at_zero() {
    let mut g = LayerGraph::new("merge");
    let a = g.add_layer(layer("A"), &[]).unwrap();
    let x = g.add_layer(layer("X"), &[a]).unwrap();
    let b = g.add_root(layer("B")).unwrap();
    let m = g.add_layer(layer("M"), &[x, b]).unwrap();
    let ca = ColumnAssignment::assign(&g).unwrap();
    assert_eq!(ca.column_of(a), Some(0));
    assert_eq!(ca.column_of(b), Some(0));
    assert_eq!(ca.column_of(m), Some(2));
    assert_eq!(ca.stacks[0], vec![a, b]);
}

#[test]
fn test_removal_reassigns_columns() {
    let mut g = LayerGraph::new("chain");
    let a = g.add_layer(layer("A"), &[]).unwrap();
    let b = g.add_layer(layer("B"), &[]).unwrap();
    let c = g.add_layer(layer("C"), &[]).unwrap();
    g.remove_layer(b).unwrap();
    let ca = ColumnAssignment::assign(&g).unwrap();
    assert_eq!(ca.column_of(a), Some(0));
    assert_eq!(ca.column_of(c), Some(0));
    assert_eq!(ca.column_of(b), None);
    assert_eq!(ca.stacks, vec![vec![a, c]]);
}
