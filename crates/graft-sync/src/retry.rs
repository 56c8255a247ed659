//! Refresh-and-retry-once on rejected credentials.

use std::future::Future;

use graft_core::UpstreamFetchError;
use tracing::warn;

use crate::credentials::{CredentialProvider, SingleFlight};
use crate::error::Result;

/// Run `call` with the identity's token. On 401/403 refresh once through
/// `credentials` and retry; any second failure is returned as is.
pub async fn with_refresh_retry<P, T, F, Fut>(
    credentials: &SingleFlight<P>,
    identity: &str,
    mut call: F,
) -> Result<T>
where
    P: CredentialProvider,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = std::result::Result<T, UpstreamFetchError>>,
{
    let token = credentials.token(identity).await?;
    match call(token.clone()).await {
        Ok(value) => Ok(value),
        Err(err) if err.is_auth_failure() => {
            warn!(identity, status = ?err.status, "credential rejected, refreshing once");
            let fresh = credentials.refresh_after(identity, &token).await?;
            Ok(call(fresh).await?)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::testing::RotatingToken;
    use crate::error::SyncError;
    use std::sync::Mutex;

    /// Records the tokens it was called with and replies from a script.
    struct Script {
        replies: Mutex<Vec<std::result::Result<&'static str, UpstreamFetchError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl Script {
        fn new(mut replies: Vec<std::result::Result<&'static str, UpstreamFetchError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }

        async fn call(&self, token: String) -> std::result::Result<&'static str, UpstreamFetchError> {
            self.seen.lock().unwrap().push(token);
            self.replies.lock().unwrap().pop().unwrap()
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_success_needs_no_refresh() {
        let flight = SingleFlight::new(RotatingToken::new());
        let script = Script::new(vec![Ok("file")]);
        let out = with_refresh_retry(&flight, "u1", |t| script.call(t)).await.unwrap();
        assert_eq!(out, "file");
        assert_eq!(flight.provider().refresh_count(), 0);
    }

    #[tokio::test]
    async fn test_auth_failure_refreshes_and_retries_once() {
        let flight = SingleFlight::new(RotatingToken::new());
        let script = Script::new(vec![Err(UpstreamFetchError::http(401, "expired")), Ok("file")]);
        let out = with_refresh_retry(&flight, "u1", |t| script.call(t)).await.unwrap();
        assert_eq!(out, "file");
        assert_eq!(script.seen(), vec!["u1-token-0", "u1-token-1"]);
        assert_eq!(flight.provider().refresh_count(), 1);
    }

    #[tokio::test]
    async fn test_second_rejection_gives_up() {
        let flight = SingleFlight::new(RotatingToken::new());
        let script = Script::new(vec![
            Err(UpstreamFetchError::http(403, "forbidden")),
            Err(UpstreamFetchError::http(403, "still forbidden")),
        ]);
        let err = with_refresh_retry(&flight, "u1", |t| script.call(t)).await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch(e) if e.status == Some(403)));
        assert_eq!(script.seen().len(), 2);
        assert_eq!(flight.provider().refresh_count(), 1);
    }

    #[tokio::test]
    async fn test_other_failures_are_not_retried() {
        let flight = SingleFlight::new(RotatingToken::new());
        let script = Script::new(vec![Err(UpstreamFetchError::http(500, "boom"))]);
        let err = with_refresh_retry(&flight, "u1", |t| script.call(t)).await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch(e) if e.status == Some(500)));
        assert_eq!(script.seen().len(), 1);
        assert_eq!(flight.provider().refresh_count(), 0);
    }
}
