//! Test server wrapper that starts the gateway on a random port

use std::net::SocketAddr;

use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tollgate_config::{Config, ConsoleConfig, ServerConfig, UpstreamConfig};

/// Build a gateway config pointed at mock console and upstream servers
pub fn test_config(console_url: &str, upstream_url: &str) -> Config {
    Config {
        server: ServerConfig::default(),
        console: ConsoleConfig {
            base_url: url::Url::parse(console_url).unwrap(),
            service_key: SecretString::from("sk-console-test".to_owned()),
            token_cache_ttl_seconds: 30,
            token_cache_capacity: 100,
        },
        upstream: UpstreamConfig {
            base_url: url::Url::parse(upstream_url).unwrap(),
            api_key: Some(SecretString::from("sk-upstream-test".to_owned())),
            timeout_seconds: 5,
        },
    }
}

/// A running test gateway instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test gateway with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: &Config) -> anyhow::Result<Self> {
        let state = tollgate_gateway::build_state(config)?;
        let app = tollgate_gateway::endpoint_router().with_state(state);

        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Full URL for a path on the running gateway
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST a JSON body with a bearer token
    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> anyhow::Result<reqwest::Response> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        Ok(request.send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
