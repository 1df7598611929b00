use super::*;

#[test]
fn test_layout_config_defaults() {
    let c = LayoutConfig::new();
    assert_eq!(c.layer_spacing, 3.0);
    assert_eq!(c.neuron_spacing, 1.0);
    assert_eq!(c.spacing_multiplier, 1.0);
    assert!(!c.numbering_reversed);
    assert_eq!(c.collapse, CollapseConfig::new(20, 10, 9));
    assert!(c.styles.layer_styles.is_empty());
}

#[test]
fn test_column_x_scales_uniformly() {
    let mut c = LayoutConfig::default();
    assert_eq!(c.column_x(0), 0.0);
    assert_eq!(c.column_x(2), 6.0);
    c.spacing_multiplier = 1.5;
    assert_eq!(c.column_x(2), 9.0);
    assert_eq!(c.column_x(4) / c.column_x(2), 2.0);
}

#[test]
fn test_collapses_only_large_layers() {
    let c = CollapseConfig::new(20, 10, 9);
    assert!(!c.collapses(15));
    assert!(!c.collapses(20));
    assert!(c.collapses(21));
    assert!(c.collapses(100));
}

#[test]
fn test_collapse_requires_hidden_neurons() {
    // Keeping 4 + 4 neurons of an 8-neuron layer hides nothing.
    let c = CollapseConfig::new(5, 4, 4);
    assert!(!c.collapses(8));
    assert!(c.collapses(9));
}

#[test]
fn test_partial_config_deserialises_with_defaults() {
    let c: LayoutConfig = serde_json::from_str(
        r#"{ "collapse": { "max_per_layer": 8 }, "numbering_reversed": true }"#,
    )
    .unwrap();
    assert_eq!(c.collapse.max_per_layer, 8);
    assert_eq!(c.collapse.collapse_start, 10);
    assert!(c.numbering_reversed);
    assert_eq!(c.layer_spacing, 3.0);
}

#[test]
fn test_overflowing_thresholds_never_collapse() {
    let c = CollapseConfig::new(2, usize::MAX, 1);
    assert_eq!(c.shown(), None);
    assert!(!c.collapses(5));
    assert!(!c.collapses(usize::MAX));
}
