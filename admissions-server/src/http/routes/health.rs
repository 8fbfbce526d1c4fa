//! Liveness endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Fixed liveness text
pub const LIVENESS_MESSAGE: &str = "School Management System API is running - HI zain";

/// Liveness response
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: LIVENESS_MESSAGE,
    })
}

/// Liveness routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
