//! External design API client.

use async_trait::async_trait;
use graft_core::{DesignFile, RemoteVariableSet, UpstreamFetchError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SyncConfig;
use crate::error::Result;

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Read access to the design tool. Every call takes the bearer token to use, so the
/// caller decides when to refresh.
#[async_trait]
pub trait DesignApi: Send + Sync {
    /// The document tree of a file.
    async fn fetch_file(&self, file_key: &str, token: &str) -> std::result::Result<DesignFile, UpstreamFetchError>;

    /// The local variables of a file.
    async fn fetch_variables(
        &self,
        file_key: &str,
        token: &str,
    ) -> std::result::Result<RemoteVariableSet, UpstreamFetchError>;
}

#[derive(Deserialize)]
struct VariablesResponse {
    meta: RemoteVariableSet,
}

/// [`DesignApi`] over HTTPS with bearer auth and a per-request timeout.
pub struct HttpDesignApi {
    client: Client,
    config: SyncConfig,
}

impl HttpDesignApi {
    pub fn new(config: SyncConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> std::result::Result<T, UpstreamFetchError> {
        let url = self.url(path);
        debug!(url = url.as_str(), "GET");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| UpstreamFetchError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = url.as_str(), status = status.as_u16(), "upstream request failed");
            return Err(UpstreamFetchError::http(status.as_u16(), truncate(&body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| UpstreamFetchError::transport(format!("invalid response body: {}", err)))
    }
}

#[async_trait]
impl DesignApi for HttpDesignApi {
    async fn fetch_file(&self, file_key: &str, token: &str) -> std::result::Result<DesignFile, UpstreamFetchError> {
        self.get_json(&format!("files/{}", file_key), token).await
    }

    async fn fetch_variables(
        &self,
        file_key: &str,
        token: &str,
    ) -> std::result::Result<RemoteVariableSet, UpstreamFetchError> {
        let response: VariablesResponse = self
            .get_json(&format!("files/{}/variables/local", file_key), token)
            .await?;
        Ok(response.meta)
    }
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let api = HttpDesignApi::new(SyncConfig::new().with_api_base_url("http://localhost:9/v1/")).unwrap();
        assert_eq!(api.url("files/abc"), "http://localhost:9/v1/files/abc");
        assert_eq!(api.url("/files/abc"), "http://localhost:9/v1/files/abc");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("  short  "), "short");
        let long = "x".repeat(MAX_ERROR_BODY + 10);
        let cut = truncate(&long);
        assert_eq!(cut.len(), MAX_ERROR_BODY + 3);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_variables_response_shape() {
        let json = r#"{"status": 200, "error": false, "meta": {
            "variableCollections": {"VC:1": {"name": "Brand", "defaultModeId": "m"}},
            "variables": {"V:1": {"name": "color/a", "resolvedType": "COLOR",
                "valuesByMode": {"m": {"r": 0, "g": 0, "b": 0, "a": 1}}, "variableCollectionId": "VC:1"}}
        }}"#;
        let response: VariablesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.meta.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_status() {
        // Nothing listens on port 9 (discard) in the test environment.
        let api = HttpDesignApi::new(
            SyncConfig::new()
                .with_api_base_url("http://127.0.0.1:9/v1")
                .with_request_timeout_secs(2),
        )
        .unwrap();
        let err = api.fetch_file("abc", "token").await.unwrap_err();
        assert_eq!(err.status, None);
        assert!(!err.is_auth_failure());
    }
}
