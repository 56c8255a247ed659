//! Category classification rules.

use graft_core::{ComponentCategory, RawNode};
use serde::{Deserialize, Serialize};

use crate::{ParseError, Result};

/// Keywords that put a component in a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: ComponentCategory,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: ComponentCategory, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn matches(&self, name_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| name_lower.contains(keyword.as_str()))
    }
}

/// Heuristic for flagging icon components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRule {
    /// Components no larger than this on both axes are icons.
    pub max_size: f64,
    /// Components whose lower-cased name contains one of these are icons.
    pub keywords: Vec<String>,
}

impl Default for IconRule {
    fn default() -> Self {
        Self {
            max_size: 48.0,
            keywords: vec!["icon".to_string(), "ico-".to_string()],
        }
    }
}

/// The classification table.
///
/// `categories` is tested in order and the first rule with a keyword contained in the
/// lower-cased component name wins, so the order is part of the semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRules {
    pub categories: Vec<CategoryRule>,
    #[serde(default)]
    pub fallback: ComponentCategory,
    #[serde(default)]
    pub icon: IconRule,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryRule::new(
                    ComponentCategory::Fundamentais,
                    &[
                        "button", "btn", "input", "checkbox", "radio", "switch", "toggle",
                        "select", "dropdown",
                    ],
                ),
                CategoryRule::new(
                    ComponentCategory::Feedback,
                    &[
                        "alert", "toast", "notification", "snackbar", "modal", "dialog",
                        "tooltip", "progress", "spinner", "loader", "loading", "skeleton",
                        "badge",
                    ],
                ),
                CategoryRule::new(
                    ComponentCategory::Layout,
                    &[
                        "card", "container", "grid", "layout", "section", "divider", "header",
                        "footer", "sidebar", "panel",
                    ],
                ),
                CategoryRule::new(
                    ComponentCategory::Navegacao,
                    &[
                        "nav", "menu", "tabs", "tab bar", "breadcrumb", "pagination", "link",
                        "stepper",
                    ],
                ),
                CategoryRule::new(
                    ComponentCategory::Dados,
                    &["table", "list", "chart", "graph", "avatar", "data", "chip"],
                ),
            ],
            fallback: ComponentCategory::Fundamentais,
            icon: IconRule::default(),
        }
    }
}

impl ClassificationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a rule table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Serialize the table, e.g. to seed an editable configuration file.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        for rule in &self.categories {
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ParseError::InvalidRules(format!(
                    "empty keyword in {} rule",
                    rule.category
                )));
            }
        }
        Ok(())
    }

    /// Classify a component by name.
    pub fn classify(&self, name: &str) -> ComponentCategory {
        let name_lower = name.to_lowercase();
        self.categories
            .iter()
            .find(|rule| rule.matches(&name_lower))
            .map(|rule| rule.category)
            .unwrap_or(self.fallback)
    }

    /// Whether a component looks like an icon.
    pub fn is_icon(&self, node: &RawNode) -> bool {
        let small = node
            .absolute_bounding_box
            .map(|b| b.width <= self.icon.max_size && b.height <= self.icon.max_size)
            .unwrap_or(false);
        if small {
            return true;
        }
        let name_lower = node.node_name().unwrap_or_default().to_lowercase();
        self.icon
            .keywords
            .iter()
            .any(|keyword| name_lower.contains(keyword.as_str()))
    }
}
