#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod cost;
mod error;
mod handlers;
mod pipeline;
mod requests;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::post};
use tollgate_auth::TokenResolver;
use tollgate_billing::{BalanceGuard, LedgerClient, LedgerRecorder, UsageLogRecorder};
use tollgate_catalog::CatalogClient;
use tollgate_upstream::{UpstreamInvoker, resolve_credential};

pub use cost::compute_cost;
pub use error::{GatewayError, Result};
pub use pipeline::GatewayState;
pub use requests::{BillableRequest, ImageRequest, SpeechRequest, TranscriptionRequest, VideoRequest};

/// Build the gateway state from configuration
///
/// # Errors
///
/// Returns an error if any of the HTTP clients fail to initialize
pub fn build_state(config: &tollgate_config::Config) -> anyhow::Result<Arc<GatewayState>> {
    let auth = TokenResolver::new(
        config.console.base_url.clone(),
        config.console.service_key.clone(),
        Duration::from_secs(config.console.token_cache_ttl_seconds),
        config.console.token_cache_capacity,
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize token resolver: {e}"))?;

    let catalog = CatalogClient::new(config.console.base_url.clone(), config.console.service_key.clone())
        .map_err(|e| anyhow::anyhow!("failed to initialize catalog client: {e}"))?;

    let ledger_client = LedgerClient::new(config.console.base_url.clone(), config.console.service_key.clone())
        .map_err(|e| anyhow::anyhow!("failed to initialize ledger client: {e}"))?;

    let invoker = UpstreamInvoker::new(
        config.upstream.base_url.clone(),
        resolve_credential(config.upstream.api_key.clone()),
        Duration::from_secs(config.upstream.timeout_seconds),
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize upstream client: {e}"))?;

    Ok(Arc::new(GatewayState {
        auth,
        catalog,
        guard: BalanceGuard::new(ledger_client.clone()),
        ledger: LedgerRecorder::new(ledger_client.clone()),
        usage_log: UsageLogRecorder::new(ledger_client),
        invoker,
    }))
}

/// Create the endpoint router for the four metered modalities
pub fn endpoint_router() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/v1/audio/transcriptions", post(handlers::transcribe))
        .route("/v1/images/generations", post(handlers::generate_image))
        .route("/v1/audio/speech", post(handlers::synthesize_speech))
        .route("/v1/videos/generations", post(handlers::generate_video))
}
