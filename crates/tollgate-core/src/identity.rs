use serde::Deserialize;

/// Account identity resolved from a bearer credential
///
/// Carries no balance or pricing data, only the identity pointer the
/// rest of the pipeline charges against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentity {
    /// Account that owns the credential
    pub account_id: String,
    /// Credential record ID, recorded in ledger metadata
    pub token_id: String,
}
