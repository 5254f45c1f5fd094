use http::StatusCode;
use tollgate_core::HttpError;

/// Transport-level errors from the console's billing endpoints
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP transport or connection error
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Console returned a non-success status
    #[error("console error ({status}): {message}")]
    Api {
        /// HTTP status from the console
        status: u16,
        /// Error message from the response body
        message: String,
    },
}

/// Billing pipeline errors
///
/// The two balance reads of the guard fail with distinct variants so
/// callers can tell which stage of the check broke.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// The initial balance read failed
    #[error("balance lookup failed: {0}")]
    LookupFailed(#[source] StoreError),

    /// The fresh balance re-read failed
    #[error("balance recheck failed: {0}")]
    RecheckFailed(#[source] StoreError),

    /// The account's prepaid balance cannot cover the request
    #[error("insufficient credits: balance {current_balance}")]
    InsufficientCredits {
        /// Balance observed by the failing check
        current_balance: f64,
        /// Cost the fresh check compared against, when known
        required: Option<f64>,
    },

    /// The ledger debit insert failed; no credits were deducted
    #[error("usage transaction failed: {0}")]
    LedgerWriteFailed(#[source] StoreError),
}

impl HttpError for BillingError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InsufficientCredits { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::LookupFailed(_) | Self::RecheckFailed(_) | Self::LedgerWriteFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::LookupFailed(_) => "CREDITS_LOOKUP_FAILED",
            Self::RecheckFailed(_) => "CREDITS_RECHECK_FAILED",
            Self::InsufficientCredits { .. } => "INSUFFICIENT_CREDITS",
            Self::LedgerWriteFailed(_) => "USAGE_TRANSACTION_FAILED",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::LookupFailed(_) | Self::RecheckFailed(_) => {
                "Your balance could not be verified; retry shortly".to_string()
            }
            Self::InsufficientCredits { .. } => {
                "Your prepaid balance is too low for this request; top up and retry".to_string()
            }
            Self::LedgerWriteFailed(_) => {
                "The charge could not be recorded and no credits were deducted; retry shortly".to_string()
            }
        }
    }
}
