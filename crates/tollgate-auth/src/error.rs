use http::StatusCode;
use tollgate_core::HttpError;

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Authorization header is absent
    #[error("missing Authorization header")]
    MissingHeader,

    /// Header is malformed or the token does not resolve to an active credential
    #[error("invalid API token")]
    InvalidToken,

    /// HTTP request to the console failed
    #[error("token resolution failed: {0}")]
    ResolutionFailed(#[from] reqwest::Error),

    /// Console returned a non-success response
    #[error("console error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the console
        message: String,
    },
}

impl HttpError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHeader | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::ResolutionFailed(_) | Self::ApiError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::MissingHeader => "MISSING_AUTH_HEADER",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ResolutionFailed(_) | Self::ApiError { .. } => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::MissingHeader => "Provide an Authorization: Bearer <token> header".to_string(),
            Self::InvalidToken => "The API token is invalid or has been revoked".to_string(),
            Self::ResolutionFailed(_) | Self::ApiError { .. } => {
                "Token verification is temporarily unavailable".to_string()
            }
        }
    }
}
