//! Remote variables into the token store.

use std::collections::HashSet;

use convert_case::{Case, Casing};
use graft_core::{
    GraftError, ImportReport, RemoteVariable, RemoteVariableSet, Token, TokenStore, TokenType,
};
use tracing::{debug, info, warn};

use crate::infer::infer_token_type;
use crate::value::resolve_value;

/// Upsert every variable of `set` into `store` under `project_id`.
///
/// Tokens are matched by `(project_id, name)`. An existing token is only written
/// when its value or remote link changed, so importing the same set twice leaves the
/// second report empty. A failing variable is recorded in the report and the batch
/// carries on.
pub fn import_variables<S>(project_id: &str, set: &RemoteVariableSet, store: &mut S) -> ImportReport
where
    S: TokenStore + ?Sized,
{
    let mut importer = Importer {
        project_id,
        set,
        store,
        seen: HashSet::new(),
        report: ImportReport::new(),
    };
    for (variable_id, variable) in &set.variables {
        importer.import(variable_id, variable);
    }

    let report = importer.report;
    info!(
        project = project_id,
        imported = report.imported.len(),
        updated = report.updated.len(),
        errors = report.errors.len(),
        "variables imported"
    );
    report
}

enum Outcome {
    Inserted,
    Updated,
    Unchanged,
}

struct Importer<'a, S: ?Sized> {
    project_id: &'a str,
    set: &'a RemoteVariableSet,
    store: &'a mut S,
    seen: HashSet<&'a str>,
    report: ImportReport,
}

impl<'a, S: TokenStore + ?Sized> Importer<'a, S> {
    fn import(&mut self, variable_id: &'a str, variable: &'a RemoteVariable) {
        let name = variable.name.as_str();
        if name.trim().is_empty() {
            self.report.push_error(variable_id, "variable has no name");
            return;
        }
        // Two variables mapping to one token would overwrite each other on every sync.
        if !self.seen.insert(name) {
            self.report
                .push_error(name, format!("duplicate variable name (variable {})", variable_id));
            return;
        }

        match self.upsert(variable_id, variable) {
            Ok(Outcome::Inserted) => self.report.imported.push(name.to_string()),
            Ok(Outcome::Updated) => self.report.updated.push(name.to_string()),
            Ok(Outcome::Unchanged) => debug!(token = name, "token unchanged"),
            Err(err) => {
                warn!(token = name, variable = variable_id, error = %err, "variable import failed");
                self.report.push_error(name, err);
            }
        }
    }

    fn upsert(&mut self, variable_id: &str, variable: &RemoteVariable) -> Result<Outcome, GraftError> {
        let value = resolve_value(self.set, variable)?;

        if let Some(existing) = self.store.find_token(self.project_id, &variable.name)? {
            if existing.value == value && existing.figma_variable_id.as_deref() == Some(variable_id) {
                return Ok(Outcome::Unchanged);
            }
            self.store
                .update_token(self.project_id, &variable.name, &value, Some(variable_id))?;
            return Ok(Outcome::Updated);
        }

        let token_type = infer_token_type(variable.resolved_type, &variable.name);
        self.store.insert_token(Token {
            name: variable.name.clone(),
            value,
            token_type,
            category: category_for(self.set, variable, token_type),
            figma_variable_id: Some(variable_id.to_string()),
            project_id: self.project_id.to_string(),
        })?;
        Ok(Outcome::Inserted)
    }
}

/// Collection name in lower-kebab form, or the token type slug when unnamed.
fn category_for(set: &RemoteVariableSet, variable: &RemoteVariable, token_type: TokenType) -> String {
    set.variable_collections
        .get(&variable.variable_collection_id)
        .map(|collection| collection.name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_case(Case::Kebab))
        .unwrap_or_else(|| token_type.slug().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{
        MemoryTokenStore, ResolvedType, StoreError, StoreResult, VariableCollection,
    };
    use serde_json::json;

    fn sample_set() -> RemoteVariableSet {
        RemoteVariableSet::new()
            .with_collection("VC:1", VariableCollection::new("Brand Colors", "m1"))
            .with_collection("VC:2", VariableCollection::new("", "m2"))
            .with_variable(
                "V:1",
                RemoteVariable::new("color/primary-500", ResolvedType::Color, "VC:1")
                    .with_value("m1", json!({"r": 1, "g": 0, "b": 0, "a": 1})),
            )
            .with_variable(
                "V:2",
                RemoteVariable::new("spacing/md", ResolvedType::Float, "VC:2")
                    .with_value("m2", json!(16)),
            )
    }

    #[test]
    fn test_first_import_inserts() {
        let mut store = MemoryTokenStore::new();
        let report = import_variables("p1", &sample_set(), &mut store);

        assert_eq!(report.imported, vec!["color/primary-500", "spacing/md"]);
        assert!(report.updated.is_empty());
        assert!(report.errors.is_empty());

        let color = store.find_token("p1", "color/primary-500").unwrap().unwrap();
        assert_eq!(color.value, "#ff0000");
        assert_eq!(color.token_type, TokenType::Color);
        assert_eq!(color.category, "brand-colors");
        assert_eq!(color.figma_variable_id.as_deref(), Some("V:1"));

        let spacing = store.find_token("p1", "spacing/md").unwrap().unwrap();
        assert_eq!(spacing.token_type, TokenType::Spacing);
        assert_eq!(spacing.category, "spacing");
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let mut store = MemoryTokenStore::new();
        import_variables("p1", &sample_set(), &mut store);
        let report = import_variables("p1", &sample_set(), &mut store);
        assert!(report.is_noop(), "{:?}", report);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_changed_value_updates_in_place() {
        let mut store = MemoryTokenStore::with_tokens(vec![Token::new(
            "p1",
            "spacing/md",
            "12",
            TokenType::Spacing,
        )]);
        let report = import_variables("p1", &sample_set(), &mut store);
        assert_eq!(report.imported, vec!["color/primary-500"]);
        assert_eq!(report.updated, vec!["spacing/md"]);

        let token = store.find_token("p1", "spacing/md").unwrap().unwrap();
        assert_eq!(token.value, "16");
        assert_eq!(token.figma_variable_id.as_deref(), Some("V:2"));
    }

    #[test]
    fn test_bad_item_does_not_abort_batch() {
        let set = sample_set().with_variable(
            "V:3",
            RemoteVariable::new("color/broken", ResolvedType::Color, "VC:1").with_value("m1", json!(null)),
        );
        let mut store = MemoryTokenStore::new();
        let report = import_variables("p1", &set, &mut store);
        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].name, "color/broken");
        assert!(report.errors[0].error.contains("null"));
    }

    #[test]
    fn test_duplicate_names_are_reported() {
        let set = sample_set().with_variable(
            "V:9",
            RemoteVariable::new("spacing/md", ResolvedType::Float, "VC:2").with_value("m2", json!(24)),
        );
        let mut store = MemoryTokenStore::new();
        let report = import_variables("p1", &set, &mut store);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(store.find_token("p1", "spacing/md").unwrap().unwrap().value, "16");

        let again = import_variables("p1", &set, &mut store);
        assert!(again.imported.is_empty() && again.updated.is_empty());
    }

    struct FailingStore;

    impl TokenStore for FailingStore {
        fn find_token(&self, _: &str, _: &str) -> StoreResult<Option<Token>> {
            Ok(None)
        }
        fn insert_token(&mut self, token: Token) -> StoreResult<()> {
            Err(StoreError::Backend(format!("disk full writing {}", token.name)))
        }
        fn update_token(&mut self, _: &str, _: &str, _: &str, _: Option<&str>) -> StoreResult<()> {
            Ok(())
        }
        fn list_tokens(&self, _: &str) -> StoreResult<Vec<Token>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_store_failures_are_collected() {
        let report = import_variables("p1", &sample_set(), &mut FailingStore);
        assert!(report.imported.is_empty());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].error.contains("disk full"));
    }
}
