use tollgate_auth::{TokenResolver, bearer_token};
use tollgate_billing::{BalanceGuard, Charge, ChargeMetadata, LedgerRecorder, UsageLogEntry, UsageLogRecorder};
use tollgate_catalog::{CatalogClient, resolve_pricing};
use tollgate_core::{AccountIdentity, Modality};
use tollgate_upstream::UpstreamInvoker;

use crate::cost::compute_cost;
use crate::error::Result;
use crate::requests::BillableRequest;

/// Shared state for all four request handlers
///
/// Owns the pipeline's collaborators; requests share nothing else, so
/// handlers for the same account run fully concurrently.
pub struct GatewayState {
    pub(crate) auth: TokenResolver,
    pub(crate) catalog: CatalogClient,
    pub(crate) guard: BalanceGuard,
    pub(crate) ledger: LedgerRecorder,
    pub(crate) usage_log: UsageLogRecorder,
    pub(crate) invoker: UpstreamInvoker,
}

impl GatewayState {
    /// Authenticate the caller from the raw Authorization header
    ///
    /// This runs first in every request path, before the body is even
    /// validated.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<std::sync::Arc<AccountIdentity>> {
        let token = bearer_token(authorization)?;
        Ok(self.auth.resolve(token).await?)
    }

    /// Run the metered pipeline for one authenticated, validated request
    ///
    /// Stages run in a fixed order and every failure short-circuits:
    /// resolve model, resolve pricing, pre-check balance, compute cost,
    /// fresh-check balance, invoke upstream, record the ledger debit,
    /// enqueue the usage log, respond.
    ///
    /// The upstream call happens before the ledger write; a ledger
    /// failure after a completed upstream call therefore leaves an
    /// unbilled upstream request behind. That ordering is part of the
    /// billing contract and is not reordered here.
    pub async fn execute(
        &self,
        modality: Modality,
        identity: &AccountIdentity,
        request: BillableRequest,
    ) -> Result<serde_json::Value> {
        let record = self.catalog.resolve_model(&request.model).await?;
        let sheet = self.catalog.price_sheet(&record.slug).await?;
        let pricing = resolve_pricing(&sheet, modality)?;

        // First balance read happens before the cost is known so an
        // exhausted account does no further work
        self.guard.precheck(&identity.account_id).await?;

        let cost = compute_cost(request.quantity, pricing.unit, pricing.unit_price)?;

        // Fresh read immediately before committing to the upstream call
        self.guard.recheck(&identity.account_id, cost).await?;

        let outcome = self.invoker.invoke(modality, &request.upstream_body).await;

        let charge = Charge {
            account_id: identity.account_id.clone(),
            amount: cost,
            description: format!("{modality} with {}", record.slug),
            metadata: ChargeMetadata {
                token_id: identity.token_id.clone(),
                model: record.slug.clone(),
                quantity: request.quantity,
                unit: pricing.unit.as_str().to_owned(),
                unit_price: pricing.unit_price,
                provider_fallback: outcome.fallback,
            },
        };
        self.ledger.record_charge(&charge).await?;

        self.usage_log.record(UsageLogEntry {
            account_id: identity.account_id.clone(),
            modality,
            model: record.slug.clone(),
            cost_usd: cost,
            upstream_request_id: outcome.request_id(),
        });

        tracing::info!(
            account_id = %identity.account_id,
            %modality,
            model = %record.slug,
            cost_usd = cost,
            fallback = outcome.fallback,
            "request billed"
        );

        Ok(with_billing_block(outcome.payload, cost, &pricing))
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState").finish_non_exhaustive()
    }
}

/// Merge the billing block into the provider payload
///
/// A non-object provider payload is wrapped so the block always has a
/// place to live.
fn with_billing_block(
    payload: serde_json::Value,
    cost: f64,
    pricing: &tollgate_catalog::ResolvedPricing,
) -> serde_json::Value {
    let billing = serde_json::json!({
        "cost_usd": cost,
        "unit_price_usd": pricing.unit_price,
        "unit": pricing.unit.as_str(),
    });

    let mut payload = payload;
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("billing".to_owned(), billing);
        payload
    } else {
        serde_json::json!({ "result": payload, "billing": billing })
    }
}
