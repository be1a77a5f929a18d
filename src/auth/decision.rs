use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::OAuthError;
use crate::sources::oauth2::TokenFetch;

/// Which path produced the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenFetchResult {
    CachedTokenUsed { token: String },
    FreshTokenIssued { token: String },
}

impl TokenFetchResult {
    pub fn token(&self) -> &str {
        match self {
            TokenFetchResult::CachedTokenUsed { token } | TokenFetchResult::FreshTokenIssued { token } => token,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, TokenFetchResult::FreshTokenIssued { .. })
    }
}

/// A token exchange already running on the runtime.
#[derive(Debug)]
pub struct PendingFetch(JoinHandle<Result<String, OAuthError>>);

impl PendingFetch {
    pub async fn join(self) -> Result<String, OAuthError> {
        self.0.await.unwrap_or_else(|err| {
            Err(OAuthError::unknown(
                "the token fetch task did not complete",
                err.to_string(),
            ))
        })
    }
}

/// Starts the exchange right away so a cache miss does not pay for it
/// sequentially. On a cache hit the handle is dropped and the task runs to
/// completion unobserved; nothing cancels it.
pub fn spawn_fetch(fetch: TokenFetch) -> PendingFetch {
    PendingFetch(tokio::spawn(fetch))
}

/// Picks the cached token when there is one, otherwise waits for `pending`.
///
/// `pending` is never polled on a hit, so its failure cannot surface there.
pub async fn resolve_token<F>(cached: Option<&str>, pending: F) -> Result<TokenFetchResult, OAuthError>
where
    F: Future<Output = Result<String, OAuthError>>,
{
    if let Some(token) = cached.filter(|token| !token.is_empty()) {
        debug!("cache hit, reusing access token");
        return Ok(TokenFetchResult::CachedTokenUsed { token: token.to_owned() });
    }

    debug!("cache miss, waiting for token exchange");
    let token = pending.await?;
    Ok(TokenFetchResult::FreshTokenIssued { token })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn failing() -> impl Future<Output = Result<String, OAuthError>> {
        async {
            Err(OAuthError::Service {
                message: "An error occurred from the OAuth Service".into(),
                status_code: 500,
                debug_info: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn cached_token_wins_even_if_fetch_would_fail() {
        let result = resolve_token(Some("cachedTokenValue"), failing()).await.unwrap();
        assert_eq!(
            result,
            TokenFetchResult::CachedTokenUsed { token: "cachedTokenValue".into() }
        );
        assert!(!result.is_fresh());
    }

    #[tokio::test]
    async fn cached_token_does_not_poll_the_fetch() {
        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let pending = async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<_, OAuthError>("never".to_owned())
        };

        resolve_token(Some("cached"), pending).await.unwrap();
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cached_token_returns_while_fetch_never_completes() {
        let result = resolve_token(Some("cached"), std::future::pending()).await.unwrap();
        assert_eq!(result.token(), "cached");
    }

    #[tokio::test]
    async fn missing_token_issues_fresh_one() {
        let result = resolve_token(None, async { Ok("T".to_owned()) }).await.unwrap();
        assert_eq!(result, TokenFetchResult::FreshTokenIssued { token: "T".into() });
    }

    #[tokio::test]
    async fn empty_cached_token_counts_as_miss() {
        let result = resolve_token(Some(""), async { Ok("fresh".to_owned()) }).await.unwrap();
        assert!(result.is_fresh());
        assert_eq!(result.token(), "fresh");
    }

    #[tokio::test]
    async fn fetch_failure_propagates_unchanged() {
        let err = resolve_token(None, failing()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.kind(), "oauth-service-error");
    }

    #[tokio::test]
    async fn spawned_fetch_joins_its_result() {
        let pending = spawn_fetch(Box::pin(async { Ok::<_, OAuthError>("spawned".to_owned()) }));
        let result = resolve_token(None, pending.join()).await.unwrap();
        assert_eq!(result.token(), "spawned");
    }

    #[tokio::test]
    async fn panicked_fetch_becomes_unknown() {
        let pending = spawn_fetch(Box::pin(async {
            if true {
                panic!("exchange blew up");
            }
            Ok::<_, OAuthError>("unreachable".to_owned())
        }));
        let err = pending.join().await.unwrap_err();
        assert_eq!(err.kind(), "unknown-error");
    }
}
