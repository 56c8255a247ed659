//! Raw node to canonical property bag.

use graft_core::{
    ChildElement, ComponentProperties, CornerRadii, NodeType, RawNode, TextContent, VisualStyle,
};
use tracing::warn;

/// Default cap on child-element nesting below a component root.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Options for property extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Children nested deeper than this below the root are dropped.
    pub max_depth: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Extraction result with truncation report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub properties: ComponentProperties,
    /// Number of subtrees dropped at the depth cap.
    pub truncated: usize,
}

impl Extracted {
    pub fn is_truncated(&self) -> bool {
        self.truncated > 0
    }
}

/// Extract the canonical properties of a node with default options.
pub fn extract(node: &RawNode) -> ComponentProperties {
    extract_with(node, &ExtractOptions::default()).properties
}

/// Extract the canonical properties of a node.
///
/// Children are mirrored with an explicit worklist rather than recursion, so a
/// pathological tree is truncated at `options.max_depth` instead of exhausting the
/// stack.
pub fn extract_with(node: &RawNode, options: &ExtractOptions) -> Extracted {
    let walk = walk_children(node, options.max_depth);

    if walk.truncated > 0 {
        warn!(
            node = node.id.as_deref().unwrap_or(""),
            dropped = walk.truncated,
            max_depth = options.max_depth,
            "child tree truncated at depth cap"
        );
    }

    Extracted {
        properties: ComponentProperties {
            style: visual_style(node),
            text_contents: walk.texts,
            child_elements: walk.children,
        },
        truncated: walk.truncated,
    }
}

/// Visual and layout attributes of a single node, without descending.
pub fn visual_style(node: &RawNode) -> VisualStyle {
    VisualStyle {
        fills: node.fills.clone(),
        strokes: node.strokes.clone(),
        stroke_weight: node.stroke_weight,
        effects: node.effects.clone(),
        corner_radius: node.corner_radius,
        corner_radii: node.rectangle_corner_radii.map(CornerRadii::from_array),
        width: node.absolute_bounding_box.map(|b| b.width),
        height: node.absolute_bounding_box.map(|b| b.height),
        opacity: node.opacity,
        layout_mode: node.layout_mode,
        padding_left: node.padding_left,
        padding_right: node.padding_right,
        padding_top: node.padding_top,
        padding_bottom: node.padding_bottom,
        item_spacing: node.item_spacing,
    }
}

struct Walk {
    children: Vec<ChildElement>,
    texts: Vec<TextContent>,
    truncated: usize,
}

/// A node whose children are still being visited.
struct Frame<'a> {
    node: &'a RawNode,
    depth: usize,
    next: usize,
    /// The node or one of its ancestors is hidden.
    hidden: bool,
    built: Vec<ChildElement>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a RawNode, depth: usize, hidden: bool) -> Self {
        Self {
            node,
            depth,
            next: 0,
            hidden,
            built: Vec::with_capacity(node.children.len()),
        }
    }
}

fn walk_children(root: &RawNode, max_depth: usize) -> Walk {
    let mut stack = vec![Frame::new(root, 0, false)];
    let mut texts = Vec::new();
    let mut truncated = 0;

    loop {
        let Some(top) = stack.last_mut() else {
            break;
        };
        let node = top.node;

        if top.next < node.children.len() {
            let child = &node.children[top.next];
            top.next += 1;
            let depth = top.depth + 1;
            let hidden = top.hidden || !child.is_visible();

            if depth > max_depth {
                truncated += 1;
                continue;
            }

            // Pre-order: text records come out in document order.
            if child.node_type == NodeType::Text && !hidden {
                if let Some(characters) = &child.characters {
                    texts.push(TextContent {
                        node_id: child.id.clone().unwrap_or_default(),
                        characters: characters.clone(),
                        style: child.style.clone(),
                    });
                }
            }

            stack.push(Frame::new(child, depth, hidden));
            continue;
        }

        let Some(frame) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.built.push(child_element(frame.node, frame.built)),
            None => {
                return Walk {
                    children: frame.built,
                    texts,
                    truncated,
                }
            }
        }
    }

    Walk {
        children: Vec::new(),
        texts,
        truncated,
    }
}

fn child_element(node: &RawNode, children: Vec<ChildElement>) -> ChildElement {
    let is_text = node.node_type == NodeType::Text;
    ChildElement {
        node_type: node.node_type,
        node_id: node.id.clone().unwrap_or_default(),
        name: node.name.clone(),
        visible: node.is_visible(),
        style: visual_style(node),
        typography: if is_text { node.style.clone() } else { None },
        text: if is_text { node.characters.clone() } else { None },
        children,
    }
}
