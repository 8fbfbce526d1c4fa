//! admissions-server: HTTP gateway for student admissions
//!
//! Validates admission submissions and forwards each one as a single row
//! insert to a hosted PostgREST service (e.g. Supabase `/rest/v1`).

pub mod config;
pub mod gateway;
pub mod http;
pub mod models;

pub use config::{ConfigError, GatewayConfig};
pub use gateway::{
    AdmissionError, AdmissionGateway, AdmissionResult, PostgrestStore, StoreError, StudentStore,
};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
pub use models::{AdmissionRecord, ValidationError, ValidationErrors};
