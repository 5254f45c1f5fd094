use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `${VAR}` placeholders, then deserializes
    /// and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the console or upstream sections are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.console.service_key.expose_secret().is_empty() {
            anyhow::bail!("console.service_key must not be empty");
        }

        if self.console.token_cache_ttl_seconds == 0 {
            anyhow::bail!("console.token_cache_ttl_seconds must be greater than 0");
        }

        if self.upstream.timeout_seconds == 0 {
            anyhow::bail!("upstream.timeout_seconds must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Config;

    fn parse(toml: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn minimal_config_is_valid() {
        let config = parse(
            r#"
            [console]
            base_url = "https://console.internal/"
            service_key = "sk-console-1"

            [upstream]
            base_url = "https://api.upstream.example/"
        "#,
        )
        .unwrap();

        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
    }

    #[test]
    fn empty_service_key_rejected() {
        let err = parse(
            r#"
            [console]
            base_url = "https://console.internal/"
            service_key = ""

            [upstream]
            base_url = "https://api.upstream.example/"
        "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("service_key"));
    }

    #[test]
    fn zero_upstream_timeout_rejected() {
        let err = parse(
            r#"
            [console]
            base_url = "https://console.internal/"
            service_key = "sk-console-1"

            [upstream]
            base_url = "https://api.upstream.example/"
            timeout_seconds = 0
        "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_cache_ttl_rejected() {
        let err = parse(
            r#"
            [console]
            base_url = "https://console.internal/"
            service_key = "sk-console-1"
            token_cache_ttl_seconds = 0

            [upstream]
            base_url = "https://api.upstream.example/"
        "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("token_cache_ttl_seconds"));
    }
}
