use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::fallback::{demo_metrics, demo_parsed_document};
use crate::gateway::{BackendGateway, GatewayResult, UploadKind, UploadedFile};
use crate::models::JobDraft;

/// Stand-in used when a session switches the backend off. Answers every call
/// locally with demo data and never touches the network.
pub struct OfflineGateway {
    base_url: String,
}

impl OfflineGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BackendGateway for OfflineGateway {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_jobs(&self, _skip: u32, _limit: u32) -> GatewayResult {
        Ok(json!([]))
    }

    async fn create_job(&self, job: &JobDraft) -> GatewayResult {
        debug!("Offline mode: job '{}' kept locally", job.title);
        Ok(job.to_backend_body())
    }

    async fn get_candidates(&self, _skip: u32, _limit: u32) -> GatewayResult {
        Ok(json!([]))
    }

    async fn apply_to_job(&self, _job_id: &str, resume: &UploadedFile) -> GatewayResult {
        Ok(json!({
            "relevance_score": 75,
            "verdict": "Medium",
            "missing_skills": ["Connect to backend for real analysis"],
            "feedback": "Offline mode: backend not connected, so this score is a placeholder.",
            "resume_filename": resume.file_name,
        }))
    }

    async fn parse_job_document(&self, document: &UploadedFile) -> GatewayResult {
        UploadKind::JobDocument.validate(document)?;
        let doc = demo_parsed_document(&document.file_name);
        Ok(serde_json::to_value(doc).unwrap_or(Value::Null))
    }

    async fn get_metrics(&self) -> GatewayResult {
        let m = demo_metrics();
        Ok(json!({
            "total_applications": m.total_applications,
            "open_positions": m.open_positions,
            "high_fit_candidates": m.high_fit_candidates,
            "avg_score": m.avg_score,
        }))
    }

    async fn health_check(&self) -> GatewayResult {
        Ok(json!({ "status": "healthy", "endpoint": "offline" }))
    }
}
