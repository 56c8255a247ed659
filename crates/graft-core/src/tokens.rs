//! Design token and remote variable types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a persisted design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Color,
    Spacing,
    Typography,
    BorderRadius,
    Shadow,
    Opacity,
    ZIndex,
    Other,
}

impl TokenType {
    /// Lower-kebab slug, used as a fallback category and in CSS variable names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::BorderRadius => "border-radius",
            Self::Shadow => "shadow",
            Self::Opacity => "opacity",
            Self::ZIndex => "z-index",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A named, typed design value persisted per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Project-unique namespaced path, e.g. `color/primary-500`.
    pub name: String,
    /// Canonical string value.
    pub value: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub category: String,
    /// Link to the remote variable, absent for locally created tokens.
    #[serde(default)]
    pub figma_variable_id: Option<String>,
    pub project_id: String,
}

impl Token {
    /// Create an unlinked token.
    pub fn new(
        project_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        token_type: TokenType,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            token_type,
            category: token_type.slug().to_string(),
            figma_variable_id: None,
            project_id: project_id.into(),
        }
    }

    /// Link the token to a remote variable.
    pub fn linked_to(mut self, variable_id: impl Into<String>) -> Self {
        self.figma_variable_id = Some(variable_id.into());
        self
    }
}

/// Remote variable payload: collections and variables keyed by id, in payload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVariableSet {
    #[serde(default, alias = "collections")]
    pub variable_collections: IndexMap<String, VariableCollection>,
    #[serde(default)]
    pub variables: IndexMap<String, RemoteVariable>,
}

impl RemoteVariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection.
    pub fn with_collection(mut self, id: impl Into<String>, collection: VariableCollection) -> Self {
        self.variable_collections.insert(id.into(), collection);
        self
    }

    /// Add a variable.
    pub fn with_variable(mut self, id: impl Into<String>, variable: RemoteVariable) -> Self {
        self.variables.insert(id.into(), variable);
        self
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// A collection of variables sharing a set of modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    #[serde(default)]
    pub name: String,
    pub default_mode_id: String,
    #[serde(default)]
    pub modes: Vec<VariableMode>,
}

impl VariableCollection {
    pub fn new(name: impl Into<String>, default_mode_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_mode_id: default_mode_id.into(),
            modes: Vec::new(),
        }
    }
}

/// A named mode of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub mode_id: String,
    #[serde(default)]
    pub name: String,
}

/// A remote design variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVariable {
    pub name: String,
    pub resolved_type: ResolvedType,
    /// Raw values by mode id, in payload order.
    #[serde(default)]
    pub values_by_mode: IndexMap<String, serde_json::Value>,
    #[serde(alias = "collectionId")]
    pub variable_collection_id: String,
}

impl RemoteVariable {
    pub fn new(
        name: impl Into<String>,
        resolved_type: ResolvedType,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resolved_type,
            values_by_mode: IndexMap::new(),
            variable_collection_id: collection_id.into(),
        }
    }

    /// Add a value for a mode.
    pub fn with_value(mut self, mode_id: impl Into<String>, value: serde_json::Value) -> Self {
        self.values_by_mode.insert(mode_id.into(), value);
        self
    }
}

/// Declared type of a remote variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
    #[serde(other)]
    Other,
}

/// Kind of divergence between remote and stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivergenceKind {
    Added,
    Modified,
    Removed,
}

/// A detected mismatch between a remote variable and a stored token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divergence {
    pub token_name: String,
    pub local_value: Option<String>,
    pub figma_value: Option<String>,
    #[serde(rename = "type")]
    pub kind: DivergenceKind,
}

/// Outcome of a batch import: never fails wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub updated: Vec<String>,
    pub errors: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing was written and nothing failed.
    pub fn is_noop(&self) -> bool {
        self.imported.is_empty() && self.updated.is_empty() && self.errors.is_empty()
    }

    /// Record a failed item.
    pub fn push_error(&mut self, name: impl Into<String>, error: impl fmt::Display) {
        self.errors.push(ImportFailure {
            name: name.into(),
            error: error.to_string(),
        });
    }
}

/// A per-item import failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportFailure {
    pub name: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_variables_payload() {
        let json = r#"{
            "variableCollections": {
                "VC:1": {"name": "Brand", "defaultModeId": "1:0", "modes": [{"modeId": "1:0", "name": "Light"}]}
            },
            "variables": {
                "V:1": {"name": "color/primary-500", "resolvedType": "COLOR",
                        "valuesByMode": {"1:0": {"r": 1, "g": 0, "b": 0, "a": 1}},
                        "variableCollectionId": "VC:1"},
                "V:2": {"name": "space/md", "resolvedType": "FLOAT",
                        "valuesByMode": {"1:0": 16}, "collectionId": "VC:1"}
            }
        }"#;
        let set: RemoteVariableSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.variables["V:2"].variable_collection_id, "VC:1");
        assert_eq!(set.variable_collections["VC:1"].default_mode_id, "1:0");
        let ids: Vec<_> = set.variables.keys().cloned().collect();
        assert_eq!(ids, vec!["V:1", "V:2"]);
    }

    #[test]
    fn test_token_type_serializes_screaming() {
        let json = serde_json::to_string(&TokenType::BorderRadius).unwrap();
        assert_eq!(json, "\"BORDER_RADIUS\"");
        let json = serde_json::to_string(&TokenType::ZIndex).unwrap();
        assert_eq!(json, "\"Z_INDEX\"");
    }

    #[test]
    fn test_divergence_kind_lowercase() {
        let d = Divergence {
            token_name: "color/a".to_string(),
            local_value: None,
            figma_value: Some("#ffffff".to_string()),
            kind: DivergenceKind::Added,
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "added");
        assert_eq!(json["tokenName"], "color/a");
    }

    #[test]
    fn test_import_report_noop() {
        let mut report = ImportReport::new();
        assert!(report.is_noop());
        report.push_error("x", "boom");
        assert!(!report.is_noop());
        assert_eq!(report.errors[0].error, "boom");
    }
}
