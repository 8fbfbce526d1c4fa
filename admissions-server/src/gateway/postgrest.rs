//! PostgREST store
//!
//! Direct REST integration with a hosted PostgREST endpoint (Supabase's
//! `/rest/v1`). Each insert opens its own [`StoreSession`], which is dropped
//! on every exit path of the call.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{StoreError, StudentStore};
use crate::config::GatewayConfig;
use crate::models::AdmissionRecord;

/// Longest upstream error body echoed back in errors
const MAX_ERROR_BODY: usize = 500;

/// Store backed by a PostgREST service
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    config: GatewayConfig,
}

impl PostgrestStore {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// Open a session valid for one logical operation.
    pub fn connect(&self) -> Result<StoreSession, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(StoreSession {
            client: builder.build()?,
            rest_url: self.config.rest_url(),
            api_key: self.config.api_key.clone(),
        })
    }
}

#[async_trait]
impl StudentStore for PostgrestStore {
    async fn insert(&self, table: &str, record: &AdmissionRecord) -> Result<Vec<Value>, StoreError> {
        let session = self.connect()?;
        session.insert(table, record).await
    }
}

/// Client handle scoped to a single operation
pub struct StoreSession {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl StoreSession {
    /// `POST {rest_url}/{table}` asking for the inserted rows back.
    pub async fn insert(
        &self,
        table: &str,
        record: &AdmissionRecord,
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/{}", self.rest_url, table);
        tracing::debug!(%url, "inserting row");

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body: truncate(error_text),
            });
        }

        let body = response.text().await?;
        decode_rows(&body)
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        tracing::trace!(rest_url = %self.rest_url, "store session released");
    }
}

/// PostgREST answers inserts with a JSON array of rows. An empty body
/// (e.g. `Prefer: return=minimal` upstream) means no rows.
fn decode_rows(body: &str) -> Result<Vec<Value>, StoreError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(other) => Err(StoreError::Decode(format!(
            "expected an array of rows, got {}",
            other
        ))),
        Err(e) => Err(StoreError::Decode(e.to_string())),
    }
}

fn truncate(text: String) -> String {
    if text.chars().count() > MAX_ERROR_BODY {
        let head: String = text.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", head)
    } else {
        text
    }
}
