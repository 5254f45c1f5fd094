use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Admin-console internal API configuration
///
/// The console fronts the managed relational store: it resolves bearer
/// tokens, serves the model catalog and price sheets, reads balances,
/// and accepts ledger and usage-log inserts.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Base URL of the console's internal API
    pub base_url: Url,

    /// Shared secret for gateway-to-console calls
    pub service_key: SecretString,

    /// Cache TTL in seconds for resolved tokens
    #[serde(default = "default_token_cache_ttl")]
    pub token_cache_ttl_seconds: u64,

    /// Maximum number of cached token resolutions
    #[serde(default = "default_token_cache_capacity")]
    pub token_cache_capacity: u64,
}

fn default_token_cache_ttl() -> u64 {
    30
}

fn default_token_cache_capacity() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal() {
        let toml = r#"
            base_url = "https://console.internal/"
            service_key = "sk-console-1"
        "#;

        let config: ConsoleConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url.as_str(), "https://console.internal/");
        assert_eq!(config.token_cache_ttl_seconds, 30);
        assert_eq!(config.token_cache_capacity, 10_000);
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
            base_url = "https://console.internal/"
            service_key = "sk-console-1"
            extra = true
        "#;

        assert!(toml::from_str::<ConsoleConfig>(toml).is_err());
    }
}
