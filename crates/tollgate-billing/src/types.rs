use serde::{Deserialize, Serialize};
use tollgate_core::Modality;

/// Structured metadata attached to every ledger debit entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeMetadata {
    /// Credential the request authenticated with
    pub token_id: String,
    /// Model slug the charge is for
    pub model: String,
    /// Billed quantity in the pricing unit
    pub quantity: f64,
    /// Normalized pricing unit name
    pub unit: String,
    /// Rate in USD per unit
    pub unit_price: f64,
    /// Whether the upstream response was a synthesized fallback
    pub provider_fallback: bool,
}

/// A debit to append to an account's ledger
#[derive(Debug, Clone)]
pub struct Charge {
    /// Account to debit
    pub account_id: String,
    /// Amount in USD
    pub amount: f64,
    /// Human-readable description
    pub description: String,
    /// Structured metadata
    pub metadata: ChargeMetadata,
}

/// Wire payload for the ledger insert
///
/// Kind and status are fixed: the gateway only ever appends completed
/// usage debits; top-ups and adjustments are written elsewhere.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LedgerInsertRequest<'a> {
    pub kind: &'static str,
    pub status: &'static str,
    pub amount: f64,
    pub description: &'a str,
    /// Server-generated key for store-side write correlation
    pub write_key: String,
    pub metadata: &'a ChargeMetadata,
}

/// Response from the ledger insert
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LedgerInsertResponse {
    /// ID of the inserted entry
    #[allow(dead_code)]
    pub entry_id: String,
}

/// Response from the balance read
#[derive(Debug, Deserialize)]
pub(crate) struct BalanceResponse {
    pub balance: f64,
}

/// Best-effort analytics record of a completed request
///
/// Loss of this record does not affect billing correctness; it is never
/// retried and its failure is never surfaced to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogEntry {
    /// Account that made the request
    pub account_id: String,
    /// Request modality
    pub modality: Modality,
    /// Model slug
    pub model: String,
    /// Charged cost in USD
    pub cost_usd: f64,
    /// Upstream request id, when the provider returned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_request_id: Option<String>,
}
