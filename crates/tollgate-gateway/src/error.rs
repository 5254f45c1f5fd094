use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use tollgate_auth::AuthError;
use tollgate_billing::BillingError;
use tollgate_catalog::CatalogError;
use tollgate_core::HttpError;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Request-pipeline errors across all four modalities
///
/// Component errors are wrapped so their status and machine code pass
/// through; the per-modality input errors live here because they are
/// produced by handler validation.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Model catalog or pricing failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Balance guard or ledger failure
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// The model field is absent or empty
    #[error("model is required")]
    MissingModel,

    /// The request body could not be parsed
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Duration is absent, non-finite or non-positive
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// Image count is outside [1, 10]
    #[error("invalid image count: {0}")]
    InvalidImageCount(i64),

    /// Explicit character count is non-positive
    #[error("invalid character count: {0}")]
    InvalidCharacters(i64),

    /// Neither text nor a character count was supplied
    #[error("text is required")]
    MissingText,

    /// The prompt field is absent or empty
    #[error("prompt is required")]
    MissingPrompt,

    /// The computed cost is not a finite positive number
    #[error("computed cost {0} is not billable")]
    InvalidCost(f64),
}

impl HttpError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(e) => e.status_code(),
            Self::Catalog(e) => e.status_code(),
            Self::Billing(e) => e.status_code(),
            Self::MissingModel
            | Self::InvalidBody(_)
            | Self::InvalidDuration(_)
            | Self::InvalidImageCount(_)
            | Self::InvalidCharacters(_)
            | Self::MissingText
            | Self::MissingPrompt => StatusCode::BAD_REQUEST,
            Self::InvalidCost(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::Auth(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Billing(e) => e.error_code(),
            Self::MissingModel => "MISSING_MODEL",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::InvalidImageCount(_) => "INVALID_IMAGE_COUNT",
            Self::InvalidCharacters(_) => "INVALID_CHARACTERS",
            Self::MissingText => "MISSING_TEXT",
            Self::MissingPrompt => "MISSING_PROMPT",
            Self::InvalidCost(_) => "INVALID_COST",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Auth(e) => e.client_message(),
            Self::Catalog(e) => e.client_message(),
            Self::Billing(e) => e.client_message(),
            Self::MissingModel => "Provide a non-empty model field".to_string(),
            Self::InvalidBody(_) => "The request body is not valid JSON for this endpoint".to_string(),
            Self::InvalidDuration(_) => "duration_seconds must be a finite number greater than 0".to_string(),
            Self::InvalidImageCount(_) => "num_images must be an integer between 1 and 10".to_string(),
            Self::InvalidCharacters(_) => "characters must be an integer greater than 0".to_string(),
            Self::MissingText => "Provide non-empty text or an explicit character count".to_string(),
            Self::MissingPrompt => "Provide a non-empty prompt".to_string(),
            Self::InvalidCost(_) => "The computed cost is not billable; the operators have been notified".to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut body = serde_json::json!({
            "error": self.to_string(),
            "code": self.error_code(),
            "message": self.client_message(),
        });

        // The insufficient-credits response additionally reports the
        // observed balance and, after the fresh check, the required cost
        if let Self::Billing(BillingError::InsufficientCredits {
            current_balance,
            required,
        }) = &self
        {
            let fields = body.as_object_mut().expect("error envelope is an object");
            fields.insert("current_balance".to_owned(), serde_json::json!(current_balance));
            if let Some(required) = required {
                fields.insert("required".to_owned(), serde_json::json!(required));
            }
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_cover_the_public_table() {
        assert_eq!(GatewayError::MissingModel.error_code(), "MISSING_MODEL");
        assert_eq!(GatewayError::InvalidBody(String::new()).error_code(), "INVALID_BODY");
        assert_eq!(
            GatewayError::InvalidDuration("missing".to_owned()).error_code(),
            "INVALID_DURATION"
        );
        assert_eq!(GatewayError::InvalidImageCount(0).error_code(), "INVALID_IMAGE_COUNT");
        assert_eq!(GatewayError::InvalidCharacters(-3).error_code(), "INVALID_CHARACTERS");
        assert_eq!(GatewayError::MissingText.error_code(), "MISSING_TEXT");
        assert_eq!(GatewayError::MissingPrompt.error_code(), "MISSING_PROMPT");
        assert_eq!(GatewayError::InvalidCost(0.0).error_code(), "INVALID_COST");
    }

    #[test]
    fn input_errors_are_client_errors() {
        assert_eq!(GatewayError::MissingModel.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::InvalidImageCount(11).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::InvalidCost(f64::NAN).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn wrapped_billing_errors_pass_through() {
        let err = GatewayError::from(BillingError::InsufficientCredits {
            current_balance: 0.05,
            required: Some(0.12),
        });
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(err.error_code(), "INSUFFICIENT_CREDITS");
    }
}
