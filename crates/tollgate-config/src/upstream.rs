use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Upstream AI provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL of the upstream provider API
    pub base_url: Url,

    /// API key for the upstream provider
    ///
    /// When absent, the invoker falls back to the
    /// `TOLLGATE_UPSTREAM_API_KEY` environment variable; with neither
    /// set, requests are sent unauthenticated.
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds for upstream calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,
}

fn default_timeout_secs() -> u64 {
    120
}
