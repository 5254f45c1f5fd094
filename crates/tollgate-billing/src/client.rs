use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::StoreError;
use crate::types::{BalanceResponse, LedgerInsertRequest, LedgerInsertResponse};
use crate::{Charge, UsageLogEntry};

/// Async HTTP client for the console's balance, ledger and usage-log
/// endpoints
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: Url,
    service_key: SecretString,
}

impl LedgerClient {
    /// Create a new ledger client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: Url, service_key: SecretString) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url,
            service_key,
        })
    }

    /// Read an account's current prepaid balance in USD
    ///
    /// GET `/internal/accounts/:id/balance`
    ///
    /// The balance is derived by the store from the account's ledger;
    /// this is a point read with no isolation guarantee.
    pub async fn balance(&self, account_id: &str) -> Result<f64, StoreError> {
        let url = self.join(&format!("internal/accounts/{account_id}/balance"))?;

        let response = self
            .http
            .get(url)
            .header("x-service-key", self.service_key.expose_secret())
            .send()
            .await?;

        if response.status().is_success() {
            let body: BalanceResponse = response.json().await?;
            Ok(body.balance)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Api { status, message })
        }
    }

    /// Append an immutable usage debit to an account's ledger
    ///
    /// POST `/internal/accounts/:id/ledger`
    ///
    /// The entry is never updated or deleted afterwards; the store
    /// aggregates ledger entries into the account balance.
    pub async fn insert_ledger_entry(&self, charge: &Charge) -> Result<(), StoreError> {
        let url = self.join(&format!("internal/accounts/{}/ledger", charge.account_id))?;

        let body = LedgerInsertRequest {
            kind: "usage",
            status: "completed",
            amount: charge.amount,
            description: &charge.description,
            write_key: uuid::Uuid::new_v4().to_string(),
            metadata: &charge.metadata,
        };

        let response = self
            .http
            .post(url)
            .header("x-service-key", self.service_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            let _: LedgerInsertResponse = response.json().await?;
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Api { status, message })
        }
    }

    /// Insert a best-effort usage-log record
    ///
    /// POST `/internal/usage-log`
    pub async fn insert_usage_log(&self, entry: &UsageLogEntry) -> Result<(), StoreError> {
        let url = self.join("internal/usage-log")?;

        let response = self
            .http
            .post(url)
            .header("x-service-key", self.service_key.expose_secret())
            .json(entry)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Api { status, message })
        }
    }

    fn join(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url.join(path).map_err(|e| StoreError::Api {
            status: 0,
            message: format!("invalid URL: {e}"),
        })
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
