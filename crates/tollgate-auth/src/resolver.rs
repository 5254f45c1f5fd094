use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use mini_moka::sync::Cache;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tollgate_core::AccountIdentity;

use crate::AuthError;

/// Extract the raw token from an `Authorization: Bearer <token>` header value
///
/// # Errors
///
/// Returns `AuthError::MissingHeader` when no header was supplied and
/// `AuthError::InvalidToken` when the header does not carry a non-empty
/// bearer token
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let token = header.strip_prefix("Bearer ").ok_or(AuthError::InvalidToken)?;

    if token.trim().is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}

/// Resolves bearer tokens to account identities by calling the console,
/// with caching
#[derive(Clone)]
pub struct TokenResolver {
    http: reqwest::Client,
    console_url: url::Url,
    service_key: SecretString,
    cache: Cache<String, Arc<AccountIdentity>>,
}

impl TokenResolver {
    /// Create a new resolver
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        console_url: url::Url,
        service_key: SecretString,
        cache_ttl: Duration,
        cache_capacity: u64,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        let cache = Cache::builder()
            .time_to_live(cache_ttl)
            .max_capacity(cache_capacity)
            .build();

        Ok(Self {
            http,
            console_url,
            service_key,
            cache,
        })
    }

    /// Resolve a raw bearer token to the owning account identity
    ///
    /// Results are cached for the configured TTL. An identity never
    /// changes for the lifetime of a token, so caching only delays
    /// revocation by at most the TTL.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token does not resolve
    /// to an active credential, or a 500-class error if the console is
    /// unreachable
    pub async fn resolve(&self, raw_token: &str) -> Result<Arc<AccountIdentity>, AuthError> {
        let cache_key = sha256_hex(raw_token);

        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let url = self
            .console_url
            .join("/internal/tokens/resolve")
            .map_err(|e| AuthError::ApiError {
                status: 0,
                message: e.to_string(),
            })?;

        let response = self
            .http
            .post(url)
            .header("x-service-key", self.service_key.expose_secret())
            .json(&serde_json::json!({ "token": raw_token }))
            .send()
            .await?;

        let status = response.status().as_u16();

        if status == 404 {
            return Err(AuthError::InvalidToken);
        }

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::ApiError { status, message });
        }

        let identity: AccountIdentity = response.json().await.map_err(|e| AuthError::ApiError {
            status: 0,
            message: format!("failed to parse response: {e}"),
        })?;

        let identity = Arc::new(identity);
        self.cache.insert(cache_key, Arc::clone(&identity));

        Ok(identity)
    }

    /// Remove a cached token resolution (e.g. after revocation)
    pub fn invalidate(&self, raw_token: &str) {
        let cache_key = sha256_hex(raw_token);
        self.cache.invalidate(&cache_key);
    }
}

/// Compute the SHA-256 hex digest of a string
fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for byte in digest {
        // Writing hex to a String is infallible
        write!(hex, "{byte:02x}").unwrap();
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_resolver(base_url: &str) -> TokenResolver {
        TokenResolver::new(
            url::Url::parse(base_url).unwrap(),
            SecretString::from("sk-console-test".to_owned()),
            Duration::from_secs(30),
            100,
        )
        .unwrap()
    }

    #[test]
    fn bearer_token_accepts_well_formed_header() {
        assert_eq!(bearer_token(Some("Bearer tok-1")).unwrap(), "tok-1");
    }

    #[test]
    fn bearer_token_rejects_missing_header() {
        assert!(matches!(bearer_token(None), Err(AuthError::MissingHeader)));
    }

    #[test]
    fn bearer_token_rejects_malformed_header() {
        assert!(matches!(bearer_token(Some("Basic abc")), Err(AuthError::InvalidToken)));
        assert!(matches!(bearer_token(Some("Bearer ")), Err(AuthError::InvalidToken)));
        assert!(matches!(bearer_token(Some("tok-1")), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn resolve_returns_identity() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/internal/tokens/resolve"))
            .and(header("x-service-key", "sk-console-test"))
            .and(body_json(serde_json::json!({ "token": "tok-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accountId": "acct_1",
                "tokenId": "tok_rec_1"
            })))
            .mount(&server)
            .await;

        let resolver = test_resolver(&server.uri());
        let identity = resolver.resolve("tok-1").await.unwrap();

        assert_eq!(identity.account_id, "acct_1");
        assert_eq!(identity.token_id, "tok_rec_1");
    }

    #[tokio::test]
    async fn resolve_maps_404_to_invalid_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/internal/tokens/resolve"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let resolver = test_resolver(&server.uri());
        let err = resolver.resolve("tok-unknown").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn resolve_caches_identities() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/internal/tokens/resolve"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accountId": "acct_1",
                "tokenId": "tok_rec_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = test_resolver(&server.uri());
        resolver.resolve("tok-1").await.unwrap();
        resolver.resolve("tok-1").await.unwrap();
    }

    #[tokio::test]
    async fn invalidate_evicts_cached_identity() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/internal/tokens/resolve"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accountId": "acct_1",
                "tokenId": "tok_rec_1"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let resolver = test_resolver(&server.uri());
        resolver.resolve("tok-1").await.unwrap();
        resolver.invalidate("tok-1");
        resolver.resolve("tok-1").await.unwrap();
    }

    #[tokio::test]
    async fn resolve_surfaces_console_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/internal/tokens/resolve"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let resolver = test_resolver(&server.uri());
        let err = resolver.resolve("tok-1").await.unwrap_err();

        assert!(matches!(err, AuthError::ApiError { status: 500, .. }));
    }
}
