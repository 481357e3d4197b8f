//! Dashboard controller: the side-effecting half of every interaction.
//!
//! Each operation runs with the session lock held, awaits gateway calls in
//! sequence, and reports the outcome back to the session as an `Event`.
//! Gateway failures never escape; they become notices plus a fallback.

pub mod actions;
pub mod pass;
pub mod sync;

use std::sync::Arc;

use thiserror::Error;

use crate::gateway::{BackendGateway, GatewayError, UploadError};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{0}")]
    Validation(String),

    #[error("Job ID not found for '{0}'. Please refresh jobs from backend.")]
    MissingJobId(String),

    #[error("Backend connection failed: {0}")]
    Unreachable(GatewayError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Backend(#[from] GatewayError),
}

/// Controller bound to one session's gateway for the length of a request.
pub struct Dashboard {
    gateway: Arc<dyn BackendGateway>,
    page_size: u32,
}

impl Dashboard {
    pub fn new(gateway: Arc<dyn BackendGateway>, page_size: u32) -> Self {
        Self { gateway, page_size }
    }

    pub fn backend_url(&self) -> &str {
        self.gateway.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::UploadedFile;

    #[test]
    fn test_missing_job_id_message() {
        let err = DashboardError::MissingJobId("Data Analyst".to_string());
        assert_eq!(
            err.to_string(),
            "Job ID not found for 'Data Analyst'. Please refresh jobs from backend."
        );
    }

    #[test]
    fn test_upload_errors_read_as_is() {
        let upload = crate::gateway::UploadKind::Resume
            .validate(&UploadedFile::new("cv.png", "x"))
            .unwrap_err();
        let err = DashboardError::from(upload);
        assert_eq!(
            err.to_string(),
            "Unsupported file type: cv.png. Please upload TXT, PDF, DOCX files only."
        );
    }
}
