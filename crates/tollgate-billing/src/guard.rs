use crate::{BillingError, LedgerClient};

/// Two-stage optimistic balance check
///
/// This is an advisory check, not a locked or serializable transaction:
/// the store only exposes point reads, so concurrent requests that all
/// pass the fresh check before any of their debits land can overspend
/// by their combined cost. The second read narrows that window; it does
/// not close it.
#[derive(Clone, Debug)]
pub struct BalanceGuard {
    client: LedgerClient,
}

impl BalanceGuard {
    pub const fn new(client: LedgerClient) -> Self {
        Self { client }
    }

    /// First check, before the cost is known
    ///
    /// Rejects accounts whose balance is already exhausted so no work
    /// is done on their behalf.
    ///
    /// # Errors
    ///
    /// `LookupFailed` on a store error; `InsufficientCredits` (with a
    /// reported balance of 0) when the balance is zero or negative
    pub async fn precheck(&self, account_id: &str) -> Result<f64, BillingError> {
        let balance = self.client.balance(account_id).await.map_err(BillingError::LookupFailed)?;

        if balance <= 0.0 {
            return Err(BillingError::InsufficientCredits {
                current_balance: 0.0,
                required: None,
            });
        }

        Ok(balance)
    }

    /// Fresh check against the computed cost, immediately before the
    /// upstream call commits the gateway to billing
    ///
    /// # Errors
    ///
    /// `RecheckFailed` on a store error; `InsufficientCredits` (with
    /// both the observed balance and the required cost) when the fresh
    /// balance cannot cover the cost
    pub async fn recheck(&self, account_id: &str, cost: f64) -> Result<f64, BillingError> {
        let balance = self.client.balance(account_id).await.map_err(BillingError::RecheckFailed)?;

        if balance < cost {
            return Err(BillingError::InsufficientCredits {
                current_balance: balance,
                required: Some(cost),
            });
        }

        Ok(balance)
    }
}
