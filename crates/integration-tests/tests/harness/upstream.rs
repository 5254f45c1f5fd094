//! Mock upstream AI provider built on wiremock

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock upstream provider
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Respond to `endpoint` with a success payload, expecting exactly
    /// `expected` calls
    pub async fn with_success(&self, endpoint: &str, body: serde_json::Value, expected: u64) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Fail every request with the given status and error body
    pub async fn with_total_failure(&self, status: u16, error_message: &str) {
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({ "error": { "message": error_message } })),
            )
            .mount(&self.server)
            .await;
    }

    /// Expect no request to reach the provider at all
    pub async fn expect_untouched(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Fail `endpoint` with the given status, expecting exactly
    /// `expected` calls
    pub async fn with_failure_at(&self, endpoint: &str, status: u16, expected: u64) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .expect(expected)
            .mount(&self.server)
            .await;
    }
}
