//! Admission gateway
//!
//! Persists one admission per call through a [`StudentStore`] and maps the
//! outcome to an explicit result or error kind. One attempt, no retries.

pub mod postgrest;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::AdmissionRecord;

pub use postgrest::{PostgrestStore, StoreSession};

/// Remote table receiving admissions
pub const STUDENTS_TABLE: &str = "students";

/// Message returned alongside the inserted row
pub const CREATED_MESSAGE: &str = "Student admission created successfully";

/// Failure talking to the external data service
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Row-insert seam over the external data service
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert one record and return the rows the service reports back.
    async fn insert(&self, table: &str, record: &AdmissionRecord) -> Result<Vec<Value>, StoreError>;
}

/// Successful submission envelope
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdmissionResult {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

#[derive(Error, Debug)]
pub enum AdmissionError {
    /// Service answered but inserted nothing
    #[error("Failed to create admission")]
    RequestFailed,

    /// Anything else that went wrong during the call
    #[error(transparent)]
    Internal(#[from] StoreError),
}

/// Submits admissions to a store
#[derive(Clone)]
pub struct AdmissionGateway {
    store: Arc<dyn StudentStore>,
}

impl AdmissionGateway {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// Insert `record` into the `students` table exactly once.
    pub async fn submit_admission(
        &self,
        record: AdmissionRecord,
    ) -> Result<AdmissionResult, AdmissionError> {
        let rows = self.store.insert(STUDENTS_TABLE, &record).await?;

        match rows.into_iter().next() {
            Some(row) => {
                tracing::info!(table = STUDENTS_TABLE, "admission created");
                Ok(AdmissionResult {
                    success: true,
                    message: CREATED_MESSAGE.to_string(),
                    data: row,
                })
            }
            None => {
                tracing::warn!(table = STUDENTS_TABLE, "insert returned no rows");
                Err(AdmissionError::RequestFailed)
            }
        }
    }
}
