//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use polyglot_i18n::I18nError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Errors returned by the API handlers.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Resolving the language or key failed
    #[error(transparent)]
    Translation(#[from] I18nError),

    /// The key resolved to a label that is not text
    #[error("Translation key '{key}' does not render to text")]
    NotText {
        /// Requested key
        key: String,
    },
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

impl ApiError {
    /// HTTP status for the error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Translation(I18nError::InvalidLanguageId(_)) => StatusCode::BAD_REQUEST,
            Self::Translation(I18nError::UnknownLanguage { .. }) => StatusCode::NOT_FOUND,
            Self::Translation(_) | Self::NotText { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        } else {
            debug!("Rejected request: {}", self);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
