//! Persistence collaborator contracts.
//!
//! The pipeline hands plain records to a store and reads them back; it has no
//! opinion on how they are kept. The in-memory stores enforce the same uniqueness
//! rules a real backend must: `(project_id, token name)` and
//! `(project_id, node_id)`.

use indexmap::IndexMap;

use crate::errors::StoreError;
use crate::model::ComponentRecord;
use crate::tokens::Token;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Token persistence.
pub trait TokenStore {
    /// Look up a token by its project-unique name.
    fn find_token(&self, project_id: &str, name: &str) -> StoreResult<Option<Token>>;

    /// Insert a new token. Fails with [`StoreError::Conflict`] if the name is taken.
    fn insert_token(&mut self, token: Token) -> StoreResult<()>;

    /// Update value and remote link of an existing token in place.
    fn update_token(
        &mut self,
        project_id: &str,
        name: &str,
        value: &str,
        figma_variable_id: Option<&str>,
    ) -> StoreResult<()>;

    /// All tokens of a project, in insertion order.
    fn list_tokens(&self, project_id: &str) -> StoreResult<Vec<Token>>;
}

/// Component persistence.
pub trait ComponentStore {
    /// Look up a component by node id.
    fn find_component(&self, project_id: &str, node_id: &str) -> StoreResult<Option<ComponentRecord>>;

    /// Insert a new component. Fails with [`StoreError::Conflict`] if the node id is taken.
    fn insert_component(&mut self, project_id: &str, record: ComponentRecord) -> StoreResult<()>;

    /// Replace an existing component.
    fn update_component(&mut self, project_id: &str, record: ComponentRecord) -> StoreResult<()>;

    /// All components of a project, in insertion order.
    fn list_components(&self, project_id: &str) -> StoreResult<Vec<ComponentRecord>>;
}

/// In-memory [`TokenStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    tokens: IndexMap<(String, String), Token>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with tokens.
    pub fn with_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut store = Self::new();
        for token in tokens {
            store
                .tokens
                .insert((token.project_id.clone(), token.name.clone()), token);
        }
        store
    }

    /// Total number of tokens across projects.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn key(project_id: &str, name: &str) -> (String, String) {
    (project_id.to_string(), name.to_string())
}

impl TokenStore for MemoryTokenStore {
    fn find_token(&self, project_id: &str, name: &str) -> StoreResult<Option<Token>> {
        Ok(self.tokens.get(&key(project_id, name)).cloned())
    }

    fn insert_token(&mut self, token: Token) -> StoreResult<()> {
        let k = key(&token.project_id, &token.name);
        if self.tokens.contains_key(&k) {
            return Err(StoreError::Conflict(format!("{}/{}", k.0, k.1)));
        }
        self.tokens.insert(k, token);
        Ok(())
    }

    fn update_token(
        &mut self,
        project_id: &str,
        name: &str,
        value: &str,
        figma_variable_id: Option<&str>,
    ) -> StoreResult<()> {
        let token = self
            .tokens
            .get_mut(&key(project_id, name))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", project_id, name)))?;
        token.value = value.to_string();
        token.figma_variable_id = figma_variable_id.map(str::to_string);
        Ok(())
    }

    fn list_tokens(&self, project_id: &str) -> StoreResult<Vec<Token>> {
        Ok(self
            .tokens
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }
}

/// In-memory [`ComponentStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryComponentStore {
    components: IndexMap<(String, String), ComponentRecord>,
}

impl MemoryComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentStore for MemoryComponentStore {
    fn find_component(&self, project_id: &str, node_id: &str) -> StoreResult<Option<ComponentRecord>> {
        Ok(self.components.get(&key(project_id, node_id)).cloned())
    }

    fn insert_component(&mut self, project_id: &str, record: ComponentRecord) -> StoreResult<()> {
        let k = key(project_id, &record.node_id);
        if self.components.contains_key(&k) {
            return Err(StoreError::Conflict(format!("{}/{}", k.0, k.1)));
        }
        self.components.insert(k, record);
        Ok(())
    }

    fn update_component(&mut self, project_id: &str, record: ComponentRecord) -> StoreResult<()> {
        let slot = self
            .components
            .get_mut(&key(project_id, &record.node_id))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", project_id, record.node_id)))?;
        *slot = record;
        Ok(())
    }

    fn list_components(&self, project_id: &str) -> StoreResult<Vec<ComponentRecord>> {
        Ok(self
            .components
            .iter()
            .filter(|((project, _), _)| project == project_id)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenType;

    #[test]
    fn test_token_uniqueness_per_project() {
        let mut store = MemoryTokenStore::new();
        store
            .insert_token(Token::new("p1", "color/a", "#000000", TokenType::Color))
            .unwrap();
        let dup = store.insert_token(Token::new("p1", "color/a", "#ffffff", TokenType::Color));
        assert!(matches!(dup, Err(StoreError::Conflict(_))));

        // Same name in another project is fine.
        store
            .insert_token(Token::new("p2", "color/a", "#ffffff", TokenType::Color))
            .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.list_tokens("p1").unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_token() {
        let mut store = MemoryTokenStore::new();
        let result = store.update_token("p1", "nope", "1", None);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_update_token_in_place() {
        let mut store =
            MemoryTokenStore::with_tokens([Token::new("p1", "space/md", "8", TokenType::Spacing)]);
        store.update_token("p1", "space/md", "16", Some("V:1")).unwrap();
        let token = store.find_token("p1", "space/md").unwrap().unwrap();
        assert_eq!(token.value, "16");
        assert_eq!(token.figma_variable_id.as_deref(), Some("V:1"));
    }

    #[test]
    fn test_component_store_roundtrip() {
        let mut store = MemoryComponentStore::new();
        store
            .insert_component("p1", ComponentRecord::new("Button", "1:1"))
            .unwrap();
        let mut record = store.find_component("p1", "1:1").unwrap().unwrap();
        record.name = "Primary Button".to_string();
        store.update_component("p1", record).unwrap();
        let listed = store.list_components("p1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Primary Button");
        assert!(store.list_components("p2").unwrap().is_empty());
    }
}
