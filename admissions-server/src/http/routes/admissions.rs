//! Admission endpoints

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::gateway::AdmissionResult;
use crate::http::error::ApiError;
use crate::http::extractors::ValidAdmission;
use crate::http::server::AppState;

/// POST /api/admissions - validate and insert one admission
async fn create_admission(
    State(state): State<Arc<AppState>>,
    ValidAdmission(record): ValidAdmission,
) -> Result<Json<AdmissionResult>, ApiError> {
    let result = state.gateway.submit_admission(record).await?;
    Ok(Json(result))
}

/// Admission routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/admissions", post(create_admission))
}
