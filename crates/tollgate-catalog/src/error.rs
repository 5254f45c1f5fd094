use http::StatusCode;
use tollgate_core::HttpError;

/// Catalog and pricing resolution errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No model row exists for the requested slug
    #[error("model not found: {slug}")]
    UnknownModel {
        /// The slug the caller requested
        slug: String,
    },

    /// The model exists but is not active and enabled
    #[error("model unavailable: {slug}")]
    ModelUnavailable {
        /// The slug the caller requested
        slug: String,
    },

    /// No price sheet exists for the model — operator error
    #[error("no price sheet configured for model: {slug}")]
    PricingMissing {
        /// Model slug without pricing
        slug: String,
    },

    /// The price sheet's unit or currency is not usable for the modality
    #[error("unsupported pricing unit '{unit}' ({currency}) for {modality}")]
    UnsupportedUnit {
        /// Raw unit label from the price sheet
        unit: String,
        /// Currency code from the price sheet
        currency: String,
        /// Modality the unit was resolved against
        modality: tollgate_core::Modality,
    },

    /// The resolved per-unit rate is not a finite positive number
    #[error("invalid pricing configuration for model: rate {rate} is not a finite positive number")]
    InvalidPricing {
        /// The rate that failed validation
        rate: f64,
    },

    /// HTTP transport error talking to the console
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Console returned a non-success response
    #[error("console error ({status}): {message}")]
    Api {
        /// HTTP status from the console
        status: u16,
        /// Error message from the response body
        message: String,
    },
}

impl HttpError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownModel { .. } | Self::ModelUnavailable { .. } => StatusCode::BAD_REQUEST,
            Self::PricingMissing { .. }
            | Self::UnsupportedUnit { .. }
            | Self::InvalidPricing { .. }
            | Self::Request(_)
            | Self::Api { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::UnknownModel { .. } => "MODEL_NOT_FOUND",
            Self::ModelUnavailable { .. } => "MODEL_UNAVAILABLE",
            Self::PricingMissing { .. } => "PRICING_MISSING",
            Self::UnsupportedUnit { .. } => "UNSUPPORTED_UNIT",
            Self::InvalidPricing { .. } => "INVALID_PRICING",
            Self::Request(_) | Self::Api { .. } => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::UnknownModel { slug } => {
                format!("Model '{slug}' does not exist; check the model name")
            }
            Self::ModelUnavailable { slug } => {
                format!("Model '{slug}' is currently disabled; try again later or pick another model")
            }
            Self::PricingMissing { .. } | Self::UnsupportedUnit { .. } | Self::InvalidPricing { .. } => {
                "Pricing for this model is misconfigured; the operators have been notified".to_string()
            }
            Self::Request(_) | Self::Api { .. } => "The model catalog is temporarily unavailable".to_string(),
        }
    }
}
