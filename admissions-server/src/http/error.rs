//! API error types with IntoResponse
//!
//! Every failure leaves the handler as `{"detail": ...}` with a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::gateway::AdmissionError;
use crate::models::ValidationErrors;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Payload failed the schema (422)
    Validation(ValidationErrors),

    /// Upstream accepted the call but returned nothing (400)
    RequestFailed { message: String },

    /// Upstream call failed (500, logged)
    Internal { message: String },

    /// Request rejected by an extractor before validation (e.g. 413)
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RequestFailed { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({ "detail": errors.details() }),
            Self::RequestFailed { message } => json!({ "detail": message }),
            Self::Internal { message } => {
                // Raw upstream text is passed through to the caller.
                tracing::error!("Internal error: {}", message);
                json!({ "detail": format!("Error: {}", message) })
            }
            Self::Rejected { message, .. } => json!({ "detail": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<AdmissionError> for ApiError {
    fn from(e: AdmissionError) -> Self {
        match e {
            AdmissionError::RequestFailed => Self::RequestFailed {
                message: e.to_string(),
            },
            AdmissionError::Internal(inner) => Self::Internal {
                message: inner.to_string(),
            },
        }
    }
}
