//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, FailedToBufferBody};
use axum::extract::{FromRequest, Request};

use super::error::ApiError;
use crate::models::{AdmissionRecord, ValidationError};

/// Extract and validate an admission form from the JSON body
///
/// Content-Type is not enforced; the body is parsed as JSON regardless.
pub struct ValidAdmission(pub AdmissionRecord);

impl<S> FromRequest<S> for ValidAdmission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        let record = AdmissionRecord::from_slice(&body)?;
        Ok(Self(record))
    }
}

/// An unreadable body is a validation failure; anything else (body too
/// large) keeps the status axum assigned.
fn body_rejection(e: BytesRejection) -> ApiError {
    match e {
        BytesRejection::FailedToBufferBody(FailedToBufferBody::UnknownBodyError(inner)) => {
            ApiError::Validation(
                ValidationError::MalformedBody {
                    reason: inner.body_text(),
                }
                .into(),
            )
        }
        other => ApiError::Rejected {
            status: other.status(),
            message: other.body_text(),
        },
    }
}
