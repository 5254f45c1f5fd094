use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tollgate_core::Modality;
use url::Url;

use crate::extract::error_text;

/// Environment fallback for the upstream credential when the admin
/// key store has none configured
const UPSTREAM_API_KEY_ENV: &str = "TOLLGATE_UPSTREAM_API_KEY";

/// Resolve the upstream provider credential
///
/// Prefers the key from the admin-managed store (surfaced through
/// config), falling back to the `TOLLGATE_UPSTREAM_API_KEY` environment
/// variable. Returns `None` when neither is set; requests are then sent
/// unauthenticated.
pub fn resolve_credential(configured: Option<SecretString>) -> Option<SecretString> {
    configured.or_else(|| std::env::var(UPSTREAM_API_KEY_ENV).ok().map(SecretString::from))
}

/// Result of an upstream invocation
///
/// `fallback` is true iff every candidate path failed and the payload
/// was synthesized by the gateway.
#[derive(Debug, Clone)]
pub struct UpstreamOutcome {
    /// Provider response body, or the synthesized fallback payload
    pub payload: serde_json::Value,
    /// Whether the payload is a synthesized fallback
    pub fallback: bool,
}

impl UpstreamOutcome {
    /// Upstream request id, when the provider returned one
    pub fn request_id(&self) -> Option<String> {
        self.payload
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
    }
}

/// Calls the upstream AI provider through ordered candidate paths
///
/// By the time the invoker runs, the balance guard has passed and the
/// gateway is committed to billing the attempt, so a total upstream
/// failure is absorbed into a clearly-flagged fallback payload rather
/// than surfaced as a gateway error.
pub struct UpstreamInvoker {
    client: reqwest::Client,
    base_url: Url,
    credential: Option<SecretString>,
}

impl UpstreamInvoker {
    /// Create a new invoker with an explicit per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: Url, credential: Option<SecretString>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(5)))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            client,
            base_url,
            credential,
        })
    }

    /// Invoke the provider for a modality, stopping at the first
    /// HTTP-success, JSON-parseable response
    ///
    /// When every candidate fails, returns a synthesized fallback
    /// payload carrying the best captured error text.
    pub async fn invoke(&self, modality: Modality, body: &serde_json::Value) -> UpstreamOutcome {
        let mut last_error = String::new();

        for path in candidate_paths(modality) {
            match self.try_candidate(path, body).await {
                Ok(payload) => {
                    tracing::debug!(%modality, path, "upstream call succeeded");
                    return UpstreamOutcome {
                        payload,
                        fallback: false,
                    };
                }
                Err(error) => {
                    tracing::warn!(%modality, path, %error, "upstream candidate failed");
                    last_error = error;
                }
            }
        }

        tracing::warn!(%modality, error = %last_error, "all upstream candidates failed, synthesizing fallback");

        UpstreamOutcome {
            payload: fallback_payload(modality, &last_error),
            fallback: true,
        }
    }

    async fn try_candidate(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, String> {
        let url = self.base_url.join(path).map_err(|e| format!("invalid URL: {e}"))?;

        let mut request = self.client.post(url).json(body);
        if let Some(ref credential) = self.credential {
            request = request.header("Authorization", format!("Bearer {}", credential.expose_secret()));
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let text = response.text().await.map_err(|e| e.to_string())?;

        if !status.is_success() {
            return Err(error_text(status, &text));
        }

        serde_json::from_str(&text).map_err(|_| format!("unparseable upstream response: {}", text.trim()))
    }
}

impl std::fmt::Debug for UpstreamInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamInvoker")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Ordered candidate endpoint paths per modality
const fn candidate_paths(modality: Modality) -> &'static [&'static str] {
    match modality {
        Modality::Transcription => &["/v1/audio/transcriptions"],
        Modality::ImageGeneration => &["/v1/images/generations", "/v1/images/generate"],
        Modality::Speech => &["/v1/audio/speech", "/v1/text-to-speech"],
        Modality::VideoGeneration => &["/v1/videos/generations"],
    }
}

/// Synthesize the fallback payload for a modality
///
/// The shape mirrors a success response with the result field emptied,
/// so clients detect degradation via `provider_fallback` instead of an
/// error that leaves billing ambiguous.
fn fallback_payload(modality: Modality, provider_error: &str) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "success": true,
        "provider_fallback": true,
        "provider_error": provider_error,
    });

    let fields = payload.as_object_mut().expect("fallback payload is an object");
    match modality {
        Modality::Transcription => {
            fields.insert("text".to_owned(), serde_json::Value::String(String::new()));
        }
        Modality::ImageGeneration => {
            fields.insert("data".to_owned(), serde_json::Value::Array(Vec::new()));
        }
        Modality::Speech => {
            fields.insert("audio".to_owned(), serde_json::Value::Null);
        }
        Modality::VideoGeneration => {
            fields.insert("video".to_owned(), serde_json::Value::Null);
            fields.insert("status".to_owned(), serde_json::Value::String("accepted".to_owned()));
        }
    }

    payload
}
