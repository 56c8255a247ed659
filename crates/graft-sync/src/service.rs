//! Fetch, then run the synchronous pipeline against the caller's store.

use std::time::Duration;

use graft_core::{
    ComponentStore, DesignFile, Divergence, ImportReport, MalformedGraphError, RemoteVariableSet, TokenStore,
};
use graft_parser::GraphParser;
use graft_tokens::{detect_divergences, import_variables, DivergenceCounts};
use tracing::info;

use crate::client::{DesignApi, HttpDesignApi};
use crate::components::store_components;
use crate::config::SyncConfig;
use crate::credentials::{CredentialProvider, SingleFlight};
use crate::error::Result;
use crate::retry::with_refresh_retry;

/// Who is syncing what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Identity whose credentials are used upstream.
    pub identity: String,
    pub project_id: String,
    /// Key of the design file.
    pub file_key: String,
}

impl SyncRequest {
    pub fn new(identity: impl Into<String>, project_id: impl Into<String>, file_key: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            project_id: project_id.into(),
            file_key: file_key.into(),
        }
    }
}

/// Result of [`SyncService::import_components`].
#[derive(Debug, Clone, Default)]
pub struct ComponentImport {
    pub report: ImportReport,
    /// Malformed nodes the parser skipped.
    pub skipped: Vec<MalformedGraphError>,
    /// Subtrees dropped at a depth cap.
    pub truncated: usize,
}

/// Orchestrates one sync call: an upstream fetch through the credential retry
/// wrapper, then import or diff against the supplied store.
///
/// Calls for different projects may run concurrently on one service; credential
/// refreshes are still serialised per identity.
pub struct SyncService<A, P> {
    api: A,
    credentials: SingleFlight<P>,
    parser: GraphParser,
}

impl<P: CredentialProvider> SyncService<HttpDesignApi, P> {
    /// A service talking HTTP to the configured API.
    pub fn from_config(config: SyncConfig, provider: P) -> Result<Self> {
        let refresh_timeout = config.refresh_timeout();
        Ok(Self::new(HttpDesignApi::new(config)?, provider).with_refresh_timeout(refresh_timeout))
    }
}

impl<A: DesignApi, P: CredentialProvider> SyncService<A, P> {
    pub fn new(api: A, provider: P) -> Self {
        Self {
            api,
            credentials: SingleFlight::new(provider),
            parser: GraphParser::new(),
        }
    }

    /// Use a parser with custom classification rules or depth cap.
    pub fn with_parser(mut self, parser: GraphParser) -> Self {
        self.parser = parser;
        self
    }

    /// Bound credential lookups and refreshes by `timeout`.
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.credentials = self.credentials.with_timeout(timeout);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn credentials(&self) -> &SingleFlight<P> {
        &self.credentials
    }

    /// Import the file's variables as project tokens.
    pub async fn sync_variables<S>(&self, request: &SyncRequest, store: &mut S) -> Result<ImportReport>
    where
        S: TokenStore + ?Sized,
    {
        let set = self.fetch_variables(request).await?;
        Ok(import_variables(&request.project_id, &set, store))
    }

    /// Compare the file's variables with the project's stored tokens. Nothing is written.
    pub async fn check_divergences<S>(&self, request: &SyncRequest, store: &S) -> Result<Vec<Divergence>>
    where
        S: TokenStore + ?Sized,
    {
        let set = self.fetch_variables(request).await?;
        let local = store.list_tokens(&request.project_id)?;
        let divergences = detect_divergences(&request.project_id, &set, &local);

        let counts = DivergenceCounts::of(&divergences);
        info!(
            project = request.project_id.as_str(),
            added = counts.added,
            modified = counts.modified,
            removed = counts.removed,
            "divergence check finished"
        );
        Ok(divergences)
    }

    /// Parse the file's components and upsert them into the project.
    pub async fn import_components<S>(&self, request: &SyncRequest, store: &mut S) -> Result<ComponentImport>
    where
        S: ComponentStore + ?Sized,
    {
        let file = self.fetch_file(request).await?;
        let outcome = self.parser.parse(&file.document);
        info!(
            project = request.project_id.as_str(),
            file = file.name.as_deref().unwrap_or(request.file_key.as_str()),
            components = outcome.components.len(),
            skipped = outcome.skipped.len(),
            "design file parsed"
        );

        let report = store_components(&request.project_id, outcome.components, store);
        Ok(ComponentImport {
            report,
            skipped: outcome.skipped,
            truncated: outcome.truncated,
        })
    }

    async fn fetch_variables(&self, request: &SyncRequest) -> Result<RemoteVariableSet> {
        let api = &self.api;
        let key = request.file_key.as_str();
        let set = with_refresh_retry(&self.credentials, &request.identity, move |token| async move {
            api.fetch_variables(key, &token).await
        })
        .await?;
        info!(file = key, variables = set.len(), "variables fetched");
        Ok(set)
    }

    async fn fetch_file(&self, request: &SyncRequest) -> Result<DesignFile> {
        let api = &self.api;
        let key = request.file_key.as_str();
        with_refresh_retry(&self.credentials, &request.identity, move |token| async move {
            api.fetch_file(key, &token).await
        })
        .await
    }
}
