use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{CatalogError, ModelRecord, PriceSheet};

/// Read-only client for the console's model catalog endpoints
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    service_key: SecretString,
}

impl CatalogClient {
    /// Create a new catalog client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: Url, service_key: SecretString) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url,
            service_key,
        })
    }

    /// Resolve a model slug to a usable model record
    ///
    /// GET `/internal/models/:slug`
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` when no row exists, `ModelUnavailable`
    /// when the row exists but is not active and enabled, or a
    /// transport/API error
    pub async fn resolve_model(&self, slug: &str) -> Result<ModelRecord, CatalogError> {
        let url = self.join(&format!("internal/models/{slug}"))?;

        let response = self
            .http
            .get(url)
            .header("x-service-key", self.service_key.expose_secret())
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(CatalogError::UnknownModel { slug: slug.to_owned() });
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api { status, message });
        }

        let record: ModelRecord = response.json().await?;

        if !record.is_usable() {
            return Err(CatalogError::ModelUnavailable { slug: slug.to_owned() });
        }

        Ok(record)
    }

    /// Load the price sheet for a model
    ///
    /// GET `/internal/models/:slug/pricing`
    ///
    /// # Errors
    ///
    /// Returns `PricingMissing` when no sheet exists for the model —
    /// an operator error, not a client error — or a transport/API error
    pub async fn price_sheet(&self, slug: &str) -> Result<PriceSheet, CatalogError> {
        let url = self.join(&format!("internal/models/{slug}/pricing"))?;

        let response = self
            .http
            .get(url)
            .header("x-service-key", self.service_key.expose_secret())
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(CatalogError::PricingMissing { slug: slug.to_owned() });
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    fn join(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url.join(path).map_err(|e| CatalogError::Api {
            status: 0,
            message: format!("invalid URL: {e}"),
        })
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
