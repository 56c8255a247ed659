//! Component and variant discovery.

use std::collections::HashSet;

use graft_core::{
    ComponentCategory, DesignFile, MalformedGraphError, NodeType, ParsedComponent, ParsedVariant,
    RawNode,
};
use graft_style::{extract_with, ExtractOptions};
use tracing::{debug, info, warn};

use crate::rules::ClassificationRules;
use crate::Result;

/// Maximum container nesting walked when looking for components.
pub const DEFAULT_MAX_TRAVERSAL_DEPTH: usize = 512;

/// Result of parsing one design file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Components in document order.
    pub components: Vec<ParsedComponent>,
    /// Nodes that were skipped, and why.
    pub skipped: Vec<MalformedGraphError>,
    /// Subtrees dropped at a depth cap (container walk or child mirroring).
    pub truncated: usize,
}

/// Walks a design document and discovers components.
#[derive(Debug, Clone)]
pub struct GraphParser {
    rules: ClassificationRules,
    extract: ExtractOptions,
    max_traversal_depth: usize,
}

impl GraphParser {
    /// Create a parser with the default rule table.
    pub fn new() -> Self {
        Self {
            rules: ClassificationRules::default(),
            extract: ExtractOptions::default(),
            max_traversal_depth: DEFAULT_MAX_TRAVERSAL_DEPTH,
        }
    }

    /// Use a custom classification table.
    pub fn with_rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Use custom property extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Cap the container walk.
    pub fn with_max_traversal_depth(mut self, depth: usize) -> Self {
        self.max_traversal_depth = depth;
        self
    }

    /// The active classification table.
    pub fn rules(&self) -> &ClassificationRules {
        &self.rules
    }

    /// Classify a component name.
    pub fn classify(&self, name: &str) -> ComponentCategory {
        self.rules.classify(name)
    }

    /// Parse a document tree.
    pub fn parse(&self, root: &RawNode) -> ParseOutcome {
        let mut state = ParseState::default();
        let mut stack = vec![(root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            match node.node_type {
                NodeType::Component => self.parse_component(node, &mut state),
                NodeType::ComponentSet => self.parse_component_set(node, &mut state),
                // Instance sublayers mirror their main component; nothing to discover.
                NodeType::Instance => {}
                _ if node.children.is_empty() => {}
                _ if depth >= self.max_traversal_depth => {
                    warn!(
                        node = node.id.as_deref().unwrap_or(""),
                        depth, "container walk truncated at depth cap"
                    );
                    state.outcome.truncated += 1;
                }
                _ => {
                    // Reversed so children pop in document order.
                    stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
                }
            }
        }

        let outcome = state.outcome;
        info!(
            components = outcome.components.len(),
            skipped = outcome.skipped.len(),
            truncated = outcome.truncated,
            "parsed design graph"
        );
        outcome
    }

    fn parse_component(&self, node: &RawNode, state: &mut ParseState) {
        let Some((id, name)) = state.identify(node) else {
            return;
        };

        let properties = self.extract(node, state);
        debug!(id, name, "component");
        state.outcome.components.push(ParsedComponent {
            name: name.to_string(),
            node_id: id.to_string(),
            figma_component_id: id.to_string(),
            category: self.rules.classify(name),
            is_icon: self.rules.is_icon(node),
            variants: Vec::new(),
            properties,
        });
    }

    fn parse_component_set(&self, node: &RawNode, state: &mut ParseState) {
        let Some((id, name)) = state.identify(node) else {
            return;
        };

        // Only direct COMPONENT children are variants.
        let mut variants = Vec::new();
        for child in node
            .children
            .iter()
            .filter(|c| c.node_type == NodeType::Component)
        {
            let Some((variant_id, variant_name)) = state.identify(child) else {
                continue;
            };
            variants.push(ParsedVariant {
                name: variant_name.to_string(),
                node_id: variant_id.to_string(),
                properties: self.extract(child, state),
            });
        }

        let properties = self.extract(node, state);
        debug!(id, name, variants = variants.len(), "component set");
        state.outcome.components.push(ParsedComponent {
            name: name.to_string(),
            node_id: id.to_string(),
            figma_component_id: id.to_string(),
            category: self.rules.classify(name),
            is_icon: self.rules.is_icon(node),
            variants,
            properties,
        });
    }

    fn extract(&self, node: &RawNode, state: &mut ParseState) -> graft_core::ComponentProperties {
        let extracted = extract_with(node, &self.extract);
        state.outcome.truncated += extracted.truncated;
        extracted.properties
    }
}

impl Default for GraphParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct ParseState {
    outcome: ParseOutcome,
    seen: HashSet<String>,
}

impl ParseState {
    /// Id and name of a node, or record why it is skipped.
    fn identify<'n>(&mut self, node: &'n RawNode) -> Option<(&'n str, &'n str)> {
        let error = match (node.node_id(), node.node_name()) {
            (None, name) => MalformedGraphError::MissingId {
                name: name.map(str::to_string),
            },
            (Some(id), None) => MalformedGraphError::MissingName { id: id.to_string() },
            (Some(id), Some(name)) => {
                if self.seen.insert(id.to_string()) {
                    return Some((id, name.trim()));
                }
                MalformedGraphError::DuplicateNodeId { id: id.to_string() }
            }
        };
        warn!(%error, "skipping node");
        self.outcome.skipped.push(error);
        None
    }
}

/// Parse a document tree with the default parser.
pub fn parse(root: &RawNode) -> Vec<ParsedComponent> {
    GraphParser::new().parse(root).components
}

/// Parse a design file as returned by the file API.
pub fn parse_file_json(json: &str) -> Result<ParseOutcome> {
    let file: DesignFile = serde_json::from_str(json)?;
    Ok(GraphParser::new().parse(&file.document))
}
