//! Backend gateway: the single point of contact with the remote scoring API.
//!
//! Every call returns parsed JSON or a `GatewayError`. A JSON body carrying an
//! `"error"` key is folded into `GatewayError::Backend` here, so callers only
//! ever branch on `Result`. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::JobDraft;

pub mod http;
pub mod offline;
#[cfg(test)]
pub mod testing;
pub mod upload;

pub use http::HttpGatewayFactory;
pub use offline::OfflineGateway;
pub use upload::{UploadError, UploadKind, UploadedFile};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Could not connect to backend at {url}. Please check if the backend is running.")]
    Connect { url: String },

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("{operation} failed with status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("API request failed: {0}")]
    Request(String),

    /// The backend answered with an `{"error": ...}` body.
    #[error("{0}")]
    Backend(String),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

pub type GatewayResult = Result<Value, GatewayError>;

/// Turns a decoded body into a result, treating a present `"error"` key as
/// failure.
pub fn check_payload(payload: Value) -> GatewayResult {
    match payload.get("error") {
        Some(Value::Null) | None => Ok(payload),
        Some(Value::String(message)) => Err(GatewayError::Backend(message.clone())),
        Some(other) => Err(GatewayError::Backend(other.to_string())),
    }
}

/// The REST operations the dashboard consumes.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Base URL this gateway talks to, without trailing slash.
    fn base_url(&self) -> &str;

    /// `GET /jobs/?skip&limit`
    async fn get_jobs(&self, skip: u32, limit: u32) -> GatewayResult;

    /// `POST /jobs/`
    async fn create_job(&self, job: &JobDraft) -> GatewayResult;

    /// `GET /applications/?skip&limit`
    async fn get_candidates(&self, skip: u32, limit: u32) -> GatewayResult;

    /// `POST /jobs/{job_id}/apply` with a multipart `resume_file`.
    async fn apply_to_job(&self, job_id: &str, resume: &UploadedFile) -> GatewayResult;

    /// `POST /jobs/parse-document` with a multipart `job_doc`.
    async fn parse_job_document(&self, document: &UploadedFile) -> GatewayResult;

    /// `GET /metrics/`
    async fn get_metrics(&self) -> GatewayResult;

    /// Probes GET-compatible endpoints until one answers.
    async fn health_check(&self) -> GatewayResult;
}

/// Hands out a gateway for a session's backend settings.
pub trait GatewayFactory: Send + Sync {
    fn gateway(&self, base_url: &str, use_backend: bool) -> Arc<dyn BackendGateway>;
}

/// Per-endpoint timeouts. JSON calls are short; uploads and the application
/// list get longer.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub request: Duration,
    pub upload: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(10),
            upload: Duration::from_secs(30),
        }
    }
}
