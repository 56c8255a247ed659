//! Bearer credentials and single-flight refresh.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_REFRESH_TIMEOUT_SECS;
use crate::error::{Result, SyncError};

/// Supplies bearer tokens per identity. Token storage and the OAuth exchange live
/// behind this trait.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// The current access token of `identity`.
    async fn access_token(&self, identity: &str) -> Result<String>;

    /// Exchange the refresh token of `identity` for a new access token.
    async fn refresh(&self, identity: &str) -> Result<String>;
}

/// A fixed token that cannot be refreshed.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn access_token(&self, _identity: &str) -> Result<String> {
        Ok(self.0.clone())
    }

    async fn refresh(&self, identity: &str) -> Result<String> {
        Err(SyncError::credential(identity, "static token cannot be refreshed"))
    }
}

/// Serialises refreshes per identity.
///
/// Concurrent callers that saw the same rejected token queue on the identity's lock;
/// the first one refreshes, the rest pick up the new token without refreshing again,
/// so an in-flight refresh token is never spent twice.
///
/// Every provider call is bounded by a timeout, so a hung token exchange cannot keep
/// the identity's lock forever.
pub struct SingleFlight<P> {
    provider: P,
    timeout: Duration,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<P: CredentialProvider> SingleFlight<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            timeout: Duration::from_secs(DEFAULT_REFRESH_TIMEOUT_SECS),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Bound each provider call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The current token of `identity`.
    pub async fn token(&self, identity: &str) -> Result<String> {
        self.bounded(identity, "access token lookup", self.provider.access_token(identity))
            .await
    }

    /// Refresh after `stale` was rejected, unless another caller already did.
    pub async fn refresh_after(&self, identity: &str, stale: &str) -> Result<String> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(identity.to_string()).or_default().clone()
        };
        let result = {
            let _guard = lock.lock().await;
            self.refresh_locked(identity, stale).await
        };
        self.release(identity, &lock).await;
        result
    }

    async fn refresh_locked(&self, identity: &str, stale: &str) -> Result<String> {
        let current = self.token(identity).await?;
        if current != stale {
            debug!(identity, "credential already refreshed by a concurrent call");
            return Ok(current);
        }

        info!(identity, "refreshing credential");
        self.bounded(identity, "credential refresh", self.provider.refresh(identity))
            .await
    }

    /// Drop the identity's lock once nobody else holds or waits on it.
    async fn release(&self, identity: &str, lock: &Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        // One reference in the map, one held by this call.
        if Arc::strong_count(lock) == 2 {
            locks.remove(identity);
        }
    }

    async fn bounded<T>(&self, identity: &str, what: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(identity, timeout = ?self.timeout, "{} timed out", what);
                Err(SyncError::credential(
                    identity,
                    format!("{} timed out after {}s", what, self.timeout.as_secs_f64()),
                ))
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn tracked_identities(&self) -> usize {
        self.locks.lock().await.len()
    }
}
