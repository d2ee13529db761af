//! OAuth token cache for the upstream provider.
//!
//! One cache instance per process, shared by `Arc`. Tokens are reused until
//! shortly before expiry; a refresh is a synchronous client-credentials
//! exchange guarded by the write half of the lock, double-checked so that
//! concurrent callers waiting on a stale token trigger a single exchange.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::ProviderError;

/// Margin subtracted from the reported lifetime; a token inside the buffer
/// is treated as expired so in-flight calls never carry a dying token.
const EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Lifetime assumed when the grant omits `expires_in`.
const DEFAULT_TTL_SECS: u64 = 1799;

const TOKEN_ENDPOINT: &str = "/v1/security/oauth2/token";

/// Client-credentials pair for the upstream provider.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Default)]
struct TokenState {
    token: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenState {
    fn valid_token(&self) -> Option<&str> {
        let expires_at = self.expires_at?;
        let token = self.token.as_deref()?;
        if Instant::now() + EXPIRY_BUFFER < expires_at {
            Some(token)
        } else {
            None
        }
    }
}

/// Process-wide bearer-token cache for one credential pair.
pub struct TokenCache {
    base_url: String,
    credentials: ClientCredentials,
    http: Arc<dyn HttpClient>,
    state: RwLock<TokenState>,
}

impl TokenCache {
    pub fn new(
        base_url: impl Into<String>,
        credentials: ClientCredentials,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            http,
            state: RwLock::new(TokenState::default()),
        }
    }

    /// A token guaranteed to outlive the expiry buffer at the moment of
    /// return. Fails only if the credential exchange fails.
    pub async fn get_valid_token(&self) -> Result<String, ProviderError> {
        // Fast path: shared lock only.
        if let Some(token) = self.state.read().await.valid_token() {
            return Ok(token.to_owned());
        }

        let mut state = self.state.write().await;
        // Re-check: another caller may have refreshed while we waited.
        if let Some(token) = state.valid_token() {
            return Ok(token.to_owned());
        }

        self.refresh(&mut state).await
    }

    /// Forced refresh for the rejected-token retry path.
    ///
    /// Bypasses the validity check, except that a token already replaced by
    /// a concurrent caller is returned as-is, so one rejection event causes
    /// at most one exchange.
    pub async fn refresh_after_rejection(&self, rejected: &str) -> Result<String, ProviderError> {
        let mut state = self.state.write().await;
        if let Some(token) = state.valid_token() {
            if token != rejected {
                return Ok(token.to_owned());
            }
        }

        self.refresh(&mut state).await
    }

    async fn refresh(&self, state: &mut TokenState) -> Result<String, ProviderError> {
        let form = format!(
            "grant_type=client_credentials&client_id={}&client_secret={}",
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(&self.credentials.client_secret),
        );
        let request =
            HttpRequest::post(format!("{}{TOKEN_ENDPOINT}", self.base_url)).with_form_body(form);

        let response = self.http.execute(request).await.map_err(|error| {
            ProviderError::auth_unreachable(format!("token endpoint unreachable: {error}"))
        })?;

        if !response.is_success() {
            return Err(ProviderError::auth(response.status, &response.body));
        }

        let grant: TokenGrant = serde_json::from_str(&response.body).map_err(|error| {
            ProviderError::auth_unreachable(format!("unparsable token grant: {error}"))
        })?;

        let ttl = Duration::from_secs(grant.expires_in.unwrap_or(DEFAULT_TTL_SECS));
        state.token = Some(grant.access_token.clone());
        state.expires_at = Some(Instant::now() + ttl);
        tracing::info!(expires_in_secs = ttl.as_secs(), "refreshed provider access token");

        Ok(grant.access_token)
    }

    #[cfg(test)]
    async fn seed(&self, token: &str, remaining: Duration) {
        let mut state = self.state.write().await;
        state.token = Some(token.to_owned());
        state.expires_at = Some(Instant::now() + remaining);
    }
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct GrantingHttpClient {
        exchanges: AtomicUsize,
        response: Mutex<Result<HttpResponse, HttpError>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl GrantingHttpClient {
        fn granting(token: &str, expires_in: Option<u64>) -> Self {
            let body = match expires_in {
                Some(ttl) => format!(r#"{{"access_token":"{token}","expires_in":{ttl}}}"#),
                None => format!(r#"{{"access_token":"{token}"}}"#),
            };
            Self {
                exchanges: AtomicUsize::new(0),
                response: Mutex::new(Ok(HttpResponse::ok_json(body))),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn rejecting(status: u16, body: &str) -> Self {
            Self {
                exchanges: AtomicUsize::new(0),
                response: Mutex::new(Ok(HttpResponse {
                    status,
                    body: body.to_owned(),
                })),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn exchange_count(&self) -> usize {
            self.exchanges.load(Ordering::SeqCst)
        }
    }

    impl HttpClient for GrantingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.exchanges.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self
                .response
                .lock()
                .expect("response store should not be poisoned")
                .clone();
            Box::pin(async move { response })
        }
    }

    fn cache_over(http: Arc<GrantingHttpClient>) -> TokenCache {
        TokenCache::new(
            "https://auth.example.test",
            ClientCredentials {
                client_id: String::from("id"),
                client_secret: String::from("secret"),
            },
            http,
        )
    }

    #[tokio::test]
    async fn first_call_exchanges_credentials() {
        let http = Arc::new(GrantingHttpClient::granting("tok-1", Some(1799)));
        let cache = cache_over(Arc::clone(&http));

        let token = cache.get_valid_token().await.expect("token should issue");
        assert_eq!(token, "tok-1");
        assert_eq!(http.exchange_count(), 1);

        let request = &http.requests.lock().expect("not poisoned")[0];
        assert!(request.url.ends_with("/v1/security/oauth2/token"));
        assert_eq!(
            request.body.as_deref(),
            Some("grant_type=client_credentials&client_id=id&client_secret=secret")
        );
    }

    #[tokio::test]
    async fn valid_token_is_reused_without_exchange() {
        let http = Arc::new(GrantingHttpClient::granting("tok-1", Some(1799)));
        let cache = cache_over(Arc::clone(&http));
        cache.seed("cached", Duration::from_secs(600)).await;

        let token = cache.get_valid_token().await.expect("token should issue");
        assert_eq!(token, "cached");
        assert_eq!(http.exchange_count(), 0);
    }

    #[tokio::test]
    async fn token_inside_expiry_buffer_is_refreshed() {
        let http = Arc::new(GrantingHttpClient::granting("tok-2", Some(1799)));
        let cache = cache_over(Arc::clone(&http));
        cache.seed("dying", Duration::from_secs(30)).await;

        let token = cache.get_valid_token().await.expect("token should issue");
        assert_eq!(token, "tok-2");
        assert_eq!(http.exchange_count(), 1);
    }

    #[tokio::test]
    async fn missing_expires_in_falls_back_to_default_ttl() {
        let http = Arc::new(GrantingHttpClient::granting("tok-3", None));
        let cache = cache_over(Arc::clone(&http));

        cache.get_valid_token().await.expect("token should issue");
        // The fallback TTL is far outside the buffer, so the token is reused.
        cache.get_valid_token().await.expect("token should issue");
        assert_eq!(http.exchange_count(), 1);
    }

    #[tokio::test]
    async fn auth_rejection_surfaces_status_and_body() {
        let http = Arc::new(GrantingHttpClient::rejecting(401, "invalid_client"));
        let cache = cache_over(Arc::clone(&http));

        let error = cache
            .get_valid_token()
            .await
            .expect_err("exchange should fail");
        assert_eq!(error.kind(), crate::ProviderErrorKind::Auth);
        assert_eq!(error.status(), Some(401));
        assert!(error.message().contains("invalid_client"));
    }

    #[tokio::test]
    async fn rejection_refresh_skips_exchange_when_token_already_replaced() {
        let http = Arc::new(GrantingHttpClient::granting("tok-new", Some(1799)));
        let cache = cache_over(Arc::clone(&http));
        cache.seed("tok-new", Duration::from_secs(600)).await;

        // A caller still holding "tok-old" reports a rejection; the cache
        // already moved on, so no exchange happens.
        let token = cache
            .refresh_after_rejection("tok-old")
            .await
            .expect("token should issue");
        assert_eq!(token, "tok-new");
        assert_eq!(http.exchange_count(), 0);

        // The holder of the current token forces a real exchange.
        let token = cache
            .refresh_after_rejection("tok-new")
            .await
            .expect("token should issue");
        assert_eq!(token, "tok-new");
        assert_eq!(http.exchange_count(), 1);
    }
}
