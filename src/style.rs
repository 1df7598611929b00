//! Style resolution for layers, their outgoing connections and their boxes.
//!
//! Precedence, lowest to highest:
//!   1. library defaults
//!   2. global `StyleConfig` fields
//!   3. the per-layer override (by id, else by name)
//!   4. box sub-attributes, layered on top of the layer's own style
//!
//! Resolution is field-by-field: an unset field falls through to the next
//! lower level. Misses never fail; they are reported as `StyleWarning`s.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::network::{LayerGraph, LayerId};

// ─── Defaults ────────────────────────────────────────────────────────────────

pub const DEFAULT_NEURON_FILL: &str = "lightblue";
pub const DEFAULT_NEURON_EDGE: &str = "navy";
pub const DEFAULT_NEURON_EDGE_WIDTH: f64 = 1.5;
pub const DEFAULT_NEURON_RADIUS: f64 = 0.3;
pub const DEFAULT_CONNECTION_COLOR: &str = "gray";
pub const DEFAULT_CONNECTION_ALPHA: f64 = 0.4;
pub const DEFAULT_CONNECTION_LINEWIDTH: f64 = 1.0;
pub const DEFAULT_BOX_FILL: &str = "none";
pub const DEFAULT_BOX_EDGE_WIDTH: f64 = 1.5;
pub const DEFAULT_BOX_PADDING: f64 = 0.5;
pub const DEFAULT_BOX_CORNER_RADIUS: f64 = 0.2;

// ─── Color ───────────────────────────────────────────────────────────────────

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|[A-Za-z]+)$")
        .expect("color pattern is valid")
});

/// A colour accepted by the renderer: `#rgb`, `#rrggbb`, `#rrggbbaa` or a
/// plain colour name such as `navy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        COLOR_RE.is_match(value).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Library constants are known-good, so they skip validation.
    fn builtin(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── StyleKey ────────────────────────────────────────────────────────────────

/// Key of a per-layer override. In description files a number is an id and a
/// string is a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleKey {
    ById(LayerId),
    ByName(String),
}

impl StyleKey {
    pub fn name(name: impl Into<String>) -> Self {
        Self::ByName(name.into())
    }
}

impl From<LayerId> for StyleKey {
    fn from(id: LayerId) -> Self {
        Self::ById(id)
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "layer {id}"),
            Self::ByName(name) => write!(f, "layer '{name}'"),
        }
    }
}

// ─── Override attribute bags ─────────────────────────────────────────────────

/// Box drawn around a layer. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    pub enabled: Option<bool>,
    pub fill_color: Option<String>,
    pub edge_color: Option<String>,
    pub edge_width: Option<f64>,
    pub padding: Option<f64>,
    pub corner_radius: Option<f64>,
}

/// One precedence level of style attributes. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    pub neuron_fill_color: Option<String>,
    pub neuron_edge_color: Option<String>,
    pub neuron_edge_width: Option<f64>,
    pub neuron_radius: Option<f64>,
    pub connection_color: Option<String>,
    pub connection_alpha: Option<f64>,
    pub connection_linewidth: Option<f64>,
    #[serde(rename = "box")]
    pub box_style: BoxStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleOverride {
    pub layer: StyleKey,
    #[serde(flatten)]
    pub style: LayerStyle,
}

/// Global style fields plus the per-layer override list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    #[serde(flatten)]
    pub global: LayerStyle,
    /// Later entries with the same key replace earlier ones.
    pub layer_styles: Vec<StyleOverride>,
}

impl StyleConfig {
    pub fn with_override(mut self, key: impl Into<StyleKey>, style: LayerStyle) -> Self {
        let key = key.into();
        self.layer_styles.retain(|o| o.layer != key);
        self.layer_styles.push(StyleOverride { layer: key, style });
        self
    }
}

// ─── Effective styles ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuronStyle {
    pub fill_color: Color,
    pub edge_color: Color,
    pub edge_width: f64,
    pub radius: f64,
}

/// Style of the connections leaving a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionStyle {
    pub color: Color,
    pub alpha: f64,
    pub linewidth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerBoxStyle {
    pub enabled: bool,
    pub fill_color: Color,
    pub edge_color: Color,
    pub edge_width: f64,
    pub padding: f64,
    pub corner_radius: f64,
}

/// Fully merged style for one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveStyle {
    pub neuron: NeuronStyle,
    pub connection: ConnectionStyle,
    #[serde(rename = "box")]
    pub layer_box: LayerBoxStyle,
}

// ─── Warnings ────────────────────────────────────────────────────────────────

/// Non-fatal style problem, reported to the consumer of resolved styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleWarning {
    /// An override key that names no layer in the graph.
    UnmatchedKey { key: StyleKey },
    /// A colour value that failed to parse; a lower level was used instead.
    InvalidColor {
        /// None for the global level.
        key: Option<StyleKey>,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for StyleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedKey { key } => write!(f, "style override for {key} matches no layer"),
            Self::InvalidColor {
                key: Some(key),
                field,
                value,
            } => write!(f, "invalid colour '{value}' for {field} in override for {key}"),
            Self::InvalidColor {
                key: None,
                field,
                value,
            } => write!(f, "invalid colour '{value}' for global {field}"),
        }
    }
}

// ─── StyleResolver ───────────────────────────────────────────────────────────

/// Resolved style of one layer together with the warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub style: EffectiveStyle,
    pub warnings: Vec<StyleWarning>,
}

pub struct StyleResolver<'a> {
    config: &'a StyleConfig,
}

/// One populated precedence level, highest first when collected.
struct Level<'a> {
    key: Option<&'a StyleKey>,
    style: &'a LayerStyle,
}

impl<'a> StyleResolver<'a> {
    pub fn new(config: &'a StyleConfig) -> Self {
        Self { config }
    }

    /// The override applying to a layer: an id match wins over a name match.
    pub fn layer_override(&self, id: LayerId, name: Option<&str>) -> Option<&'a StyleOverride> {
        let by_id = self
            .config
            .layer_styles
            .iter()
            .rev()
            .find(|o| o.layer == StyleKey::ById(id));
        by_id.or_else(|| {
            let name = name?;
            self.config
                .layer_styles
                .iter()
                .rev()
                .find(|o| matches!(&o.layer, StyleKey::ByName(n) if n == name))
        })
    }

    /// Resolve the effective style of a layer identified by `id` and `name`.
    pub fn resolve(&self, id: LayerId, name: Option<&str>) -> Resolution {
        let mut levels: Vec<Level<'a>> = Vec::with_capacity(2);
        if let Some(o) = self.layer_override(id, name) {
            levels.push(Level {
                key: Some(&o.layer),
                style: &o.style,
            });
        }
        levels.push(Level {
            key: None,
            style: &self.config.global,
        });

        let mut warnings = Vec::new();
        let neuron = NeuronStyle {
            fill_color: pick_color(
                &levels,
                "neuron_fill_color",
                |s| &s.neuron_fill_color,
                &mut warnings,
            )
            .unwrap_or_else(|| Color::builtin(DEFAULT_NEURON_FILL)),
            edge_color: pick_color(
                &levels,
                "neuron_edge_color",
                |s| &s.neuron_edge_color,
                &mut warnings,
            )
            .unwrap_or_else(|| Color::builtin(DEFAULT_NEURON_EDGE)),
            edge_width: pick(&levels, |s| s.neuron_edge_width).unwrap_or(DEFAULT_NEURON_EDGE_WIDTH),
            radius: pick(&levels, |s| s.neuron_radius).unwrap_or(DEFAULT_NEURON_RADIUS),
        };
        let connection = ConnectionStyle {
            color: pick_color(&levels, "connection_color", |s| &s.connection_color, &mut warnings)
                .unwrap_or_else(|| Color::builtin(DEFAULT_CONNECTION_COLOR)),
            alpha: pick(&levels, |s| s.connection_alpha)
                .unwrap_or(DEFAULT_CONNECTION_ALPHA)
                .clamp(0.0, 1.0),
            linewidth: pick(&levels, |s| s.connection_linewidth)
                .unwrap_or(DEFAULT_CONNECTION_LINEWIDTH),
        };
        // Box attributes sit on top of the layer's own style: an unset box
        // edge colour inherits the resolved neuron edge colour.
        let layer_box = LayerBoxStyle {
            enabled: pick(&levels, |s| s.box_style.enabled).unwrap_or(false),
            fill_color: pick_color(
                &levels,
                "box.fill_color",
                |s| &s.box_style.fill_color,
                &mut warnings,
            )
            .unwrap_or_else(|| Color::builtin(DEFAULT_BOX_FILL)),
            edge_color: pick_color(
                &levels,
                "box.edge_color",
                |s| &s.box_style.edge_color,
                &mut warnings,
            )
            .unwrap_or_else(|| neuron.edge_color.clone()),
            edge_width: pick(&levels, |s| s.box_style.edge_width).unwrap_or(DEFAULT_BOX_EDGE_WIDTH),
            padding: pick(&levels, |s| s.box_style.padding).unwrap_or(DEFAULT_BOX_PADDING),
            corner_radius: pick(&levels, |s| s.box_style.corner_radius)
                .unwrap_or(DEFAULT_BOX_CORNER_RADIUS),
        };

        Resolution {
            style: EffectiveStyle {
                neuron,
                connection,
                layer_box,
            },
            warnings,
        }
    }

    /// Override keys that match no layer of `graph`, including ids of layers
    /// that have since been removed.
    pub fn unmatched_keys(&self, graph: &LayerGraph) -> Vec<StyleWarning> {
        self.config
            .layer_styles
            .iter()
            .filter(|o| match &o.layer {
                StyleKey::ById(id) => !graph.contains(*id),
                StyleKey::ByName(name) => graph.layer_ids_by_name(name).is_empty(),
            })
            .map(|o| StyleWarning::UnmatchedKey {
                key: o.layer.clone(),
            })
            .collect()
    }
}

fn pick<T: Copy>(levels: &[Level<'_>], field: impl Fn(&LayerStyle) -> Option<T>) -> Option<T> {
    levels.iter().find_map(|l| field(l.style))
}

/// First colour that parses, highest level first. Unparseable values are
/// skipped with a warning.
fn pick_color(
    levels: &[Level<'_>],
    name: &'static str,
    field: impl Fn(&LayerStyle) -> &Option<String>,
    warnings: &mut Vec<StyleWarning>,
) -> Option<Color> {
    for level in levels {
        let Some(raw) = field(level.style) else {
            continue;
        };
        match Color::parse(raw) {
            Some(color) => return Some(color),
            None => warnings.push(StyleWarning::InvalidColor {
                key: level.key.cloned(),
                field: name,
                value: raw.clone(),
            }),
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/rust/test_style.rs"]
mod tests;
