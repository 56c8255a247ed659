//! Raw node tree as delivered by the design tool's file API.
//!
//! These types are read-only input. Every field the pipeline does not strictly need
//! is optional, and unknown enum tags fall back to an `Other` variant so that a new
//! node or paint kind upstream never fails a whole file.

use serde::{Deserialize, Serialize};

use crate::types::{BoundingBox, Color, Vector};

/// A design file as returned by the file API: the document tree plus metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub document: RawNode,
}

/// A node in the design document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub children: Vec<RawNode>,

    // Visual attributes
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub stroke_weight: Option<f64>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Per-corner radii as `[top_left, top_right, bottom_right, bottom_left]`.
    #[serde(default)]
    pub rectangle_corner_radii: Option<[f64; 4]>,
    #[serde(default)]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub opacity: Option<f64>,

    // Auto layout
    #[serde(default)]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default)]
    pub padding_left: Option<f64>,
    #[serde(default)]
    pub padding_right: Option<f64>,
    #[serde(default)]
    pub padding_top: Option<f64>,
    #[serde(default)]
    pub padding_bottom: Option<f64>,
    #[serde(default)]
    pub item_spacing: Option<f64>,

    // Text
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub style: Option<TypeStyle>,
}

impl RawNode {
    /// Create a node with an id, name and type.
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            node_type,
            ..Default::default()
        }
    }

    /// Add a child node.
    pub fn with_child(mut self, child: RawNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add a fill paint.
    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Set the bounding box size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.absolute_bounding_box = Some(BoundingBox {
            x: 0.0,
            y: 0.0,
            width,
            height,
        });
        self
    }

    /// Set text content.
    pub fn with_characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    /// Nodes are visible unless the design tool says otherwise.
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Non-empty id, if any.
    pub fn node_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Non-blank name, if any.
    pub fn node_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// Node kinds the pipeline distinguishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Canvas,
    Section,
    Frame,
    Group,
    Component,
    ComponentSet,
    Instance,
    Text,
    Vector,
    Rectangle,
    Ellipse,
    Line,
    Star,
    RegularPolygon,
    BooleanOperation,
    Slice,
    #[default]
    #[serde(other)]
    Other,
}

impl NodeType {
    /// Nodes whose children are walked when looking for components.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Document | Self::Canvas | Self::Section | Self::Frame | Self::Group
        )
    }
}

/// Auto layout direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Other,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: PaintType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gradient_handle_positions: Vec<Vector>,
}

impl Paint {
    /// A solid paint.
    pub fn solid(color: Color) -> Self {
        Self {
            paint_type: PaintType::Solid,
            visible: None,
            opacity: None,
            color: Some(color),
            gradient_stops: Vec::new(),
            gradient_handle_positions: Vec::new(),
        }
    }

    /// A gradient paint with the given stops.
    pub fn gradient(paint_type: PaintType, stops: Vec<ColorStop>) -> Self {
        Self {
            paint_type,
            visible: None,
            opacity: None,
            color: None,
            gradient_stops: stops,
            gradient_handle_positions: Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Paint colour with the paint-level opacity folded into alpha.
    pub fn effective_color(&self) -> Option<Color> {
        self.color
            .map(|c| c.with_opacity(self.opacity.unwrap_or(1.0)))
    }
}

/// Paint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Emoji,
    Video,
    #[serde(other)]
    Other,
}

/// One stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

/// A visual effect (shadow or blur).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
}

impl Effect {
    /// A drop shadow.
    pub fn drop_shadow(color: Color, offset: Vector, radius: f64) -> Self {
        Self {
            effect_type: EffectType::DropShadow,
            visible: None,
            color: Some(color),
            offset: Some(offset),
            radius,
            spread: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

/// Effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Other,
}

/// Text style of a TEXT node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
}
