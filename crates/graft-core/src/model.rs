//! Canonical component model.
//!
//! [`ComponentProperties`] is the sparse style bag every downstream consumer reads.
//! A key is present only when the source node carried the attribute; absence means
//! "inherit/none", never zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::node::{Effect, LayoutMode, NodeType, Paint, TypeStyle};
use crate::types::CornerRadii;

/// Visual and layout attributes shared by a component root and its child elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radii: Option<CornerRadii>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
}

impl VisualStyle {
    /// Whether any padding side is set.
    pub fn has_padding(&self) -> bool {
        self.padding_top.is_some()
            || self.padding_right.is_some()
            || self.padding_bottom.is_some()
            || self.padding_left.is_some()
    }
}

/// The canonical, framework-agnostic property bag of a component or variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProperties {
    #[serde(flatten)]
    pub style: VisualStyle,
    /// Every TEXT descendant, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_contents: Vec<TextContent>,
    /// Pruned mirror of the node's children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_elements: Vec<ChildElement>,
}

impl ComponentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A text record collected from a TEXT descendant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub node_id: String,
    pub characters: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TypeStyle>,
}

/// Recursive, pruned mirror of a raw node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildElement {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(flatten)]
    pub style: VisualStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildElement>,
}

fn visible_by_default() -> bool {
    true
}

impl ChildElement {
    /// Create an element of the given type.
    pub fn new(node_type: NodeType, node_id: impl Into<String>) -> Self {
        Self {
            node_type,
            node_id: node_id.into(),
            name: None,
            visible: true,
            style: VisualStyle::default(),
            typography: None,
            text: None,
            children: Vec::new(),
        }
    }

    /// Add a child element.
    pub fn with_child(mut self, child: ChildElement) -> Self {
        self.children.push(child);
        self
    }

    /// Set text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Depth of the deepest descendant (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((element, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(element.children.iter().map(|c| (c, depth + 1)));
        }
        max
    }
}

/// Component category, used to group components in the library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentCategory {
    #[default]
    Fundamentais,
    Feedback,
    Layout,
    Navegacao,
    Dados,
}

impl ComponentCategory {
    /// All categories in classification priority order.
    pub const ALL: [ComponentCategory; 5] = [
        Self::Fundamentais,
        Self::Feedback,
        Self::Layout,
        Self::Navegacao,
        Self::Dados,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fundamentais => "FUNDAMENTAIS",
            Self::Feedback => "FEEDBACK",
            Self::Layout => "LAYOUT",
            Self::Navegacao => "NAVEGACAO",
            Self::Dados => "DADOS",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component discovered by the graph parser. Transient: only its flattened
/// [`ComponentRecord`] form is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedComponent {
    pub name: String,
    pub node_id: String,
    pub figma_component_id: String,
    pub category: ComponentCategory,
    pub is_icon: bool,
    pub variants: Vec<ParsedVariant>,
    pub properties: ComponentProperties,
}

/// One variant of a component set.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVariant {
    pub name: String,
    pub node_id: String,
    pub properties: ComponentProperties,
}

/// Persisted component row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub name: String,
    pub node_id: String,
    pub figma_component_id: String,
    pub category: ComponentCategory,
    #[serde(default)]
    pub is_icon: bool,
    pub properties: ComponentProperties,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
}

impl ComponentRecord {
    /// Create a record with no variants and empty properties.
    pub fn new(name: impl Into<String>, node_id: impl Into<String>) -> Self {
        let node_id = node_id.into();
        Self {
            name: name.into(),
            figma_component_id: node_id.clone(),
            node_id,
            category: ComponentCategory::default(),
            is_icon: false,
            properties: ComponentProperties::default(),
            variants: Vec::new(),
        }
    }

    /// Set properties.
    pub fn with_properties(mut self, properties: ComponentProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Add a variant.
    pub fn with_variant(mut self, name: impl Into<String>, node_id: impl Into<String>) -> Self {
        self.variants.push(VariantRecord {
            name: name.into(),
            node_id: node_id.into(),
            properties: ComponentProperties::default(),
        });
        self
    }
}

/// Persisted variant row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub name: String,
    pub node_id: String,
    #[serde(default)]
    pub properties: ComponentProperties,
}

impl From<ParsedVariant> for VariantRecord {
    fn from(variant: ParsedVariant) -> Self {
        Self {
            name: variant.name,
            node_id: variant.node_id,
            properties: variant.properties,
        }
    }
}

impl From<ParsedComponent> for ComponentRecord {
    fn from(component: ParsedComponent) -> Self {
        Self {
            name: component.name,
            node_id: component.node_id,
            figma_component_id: component.figma_component_id,
            category: component.category,
            is_icon: component.is_icon,
            properties: component.properties,
            variants: component.variants.into_iter().map(VariantRecord::from).collect(),
        }
    }
}
