//! Mock admin-console internal API built on wiremock

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock console exposing token resolution, catalog, balance, ledger and
/// usage-log endpoints
pub struct MockConsole {
    server: MockServer,
}

impl MockConsole {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Resolve `token` to the given account identity
    pub async fn with_token(&self, token: &str, account_id: &str, token_id: &str) {
        Mock::given(method("POST"))
            .and(path("/internal/tokens/resolve"))
            .and(body_json(serde_json::json!({ "token": token })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accountId": account_id,
                "tokenId": token_id,
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject every token resolution with 404
    pub async fn with_no_tokens(&self) {
        Mock::given(method("POST"))
            .and(path("/internal/tokens/resolve"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&self.server)
            .await;
    }

    pub async fn with_model(&self, slug: &str, status: &str, enabled: bool) {
        Mock::given(method("GET"))
            .and(path(format!("/internal/models/{slug}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "slug": slug,
                "status": status,
                "enabled": enabled,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn with_pricing(&self, slug: &str, input: f64, output: f64, unit: &str, currency: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/internal/models/{slug}/pricing")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "inputPrice": input,
                "outputPrice": output,
                "unit": unit,
                "currency": currency,
            })))
            .mount(&self.server)
            .await;
    }

    /// Expect the pricing endpoint to never be hit
    pub async fn expect_no_pricing_read(&self, slug: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/internal/models/{slug}/pricing")))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub async fn with_balance(&self, account_id: &str, balance: f64) {
        Mock::given(method("GET"))
            .and(path(format!("/internal/accounts/{account_id}/balance")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "balance": balance })))
            .mount(&self.server)
            .await;
    }

    /// Expect the balance endpoint to never be hit
    pub async fn expect_no_balance_read(&self, account_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/internal/accounts/{account_id}/balance")))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Accept ledger inserts, expecting exactly `expected` of them by
    /// the time the console is dropped
    pub async fn expect_ledger_inserts(&self, account_id: &str, expected: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/internal/accounts/{account_id}/ledger")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "entryId": "led_test" })),
            )
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Fail every ledger insert with a store error
    pub async fn with_failing_ledger(&self, account_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/internal/accounts/{account_id}/ledger")))
            .respond_with(ResponseTemplate::new(500).set_body_string("store write failed"))
            .mount(&self.server)
            .await;
    }

    /// Accept usage-log inserts silently
    pub async fn accept_usage_log(&self) {
        Mock::given(method("POST"))
            .and(path("/internal/usage-log"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all ledger inserts received so far
    pub async fn ledger_insert_bodies(&self, account_id: &str) -> Vec<serde_json::Value> {
        let ledger_path = format!("/internal/accounts/{account_id}/ledger");
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == ledger_path)
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}
