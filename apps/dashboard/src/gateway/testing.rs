//! Scripted gateway for controller and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::gateway::{
    BackendGateway, GatewayError, GatewayFactory, GatewayResult, UploadedFile,
};
use crate::models::JobDraft;

#[derive(Clone)]
pub enum Reply {
    Ok(Value),
    Err(String),
}

impl Reply {
    fn to_result(&self) -> GatewayResult {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Err(m) => Err(GatewayError::Backend(m.clone())),
        }
    }
}

/// Answers each operation with a fixed reply and records every call made.
pub struct FakeGateway {
    pub jobs: Mutex<Reply>,
    pub candidates: Mutex<Reply>,
    pub metrics: Mutex<Reply>,
    pub apply: Mutex<Reply>,
    pub parse: Mutex<Reply>,
    pub create: Mutex<Reply>,
    pub health: Mutex<Reply>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Reply::Ok(json!([]))),
            candidates: Mutex::new(Reply::Ok(json!([]))),
            metrics: Mutex::new(Reply::Ok(json!({
                "total_applications": 0,
                "avg_score": 0,
                "open_positions": 0,
                "high_fit_candidates": 0
            }))),
            apply: Mutex::new(Reply::Ok(json!({}))),
            parse: Mutex::new(Reply::Ok(json!({}))),
            create: Mutex::new(Reply::Ok(json!({}))),
            health: Mutex::new(Reply::Ok(json!({"status": "healthy"}))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set(slot: &Mutex<Reply>, reply: Reply) {
        *slot.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String, slot: &Mutex<Reply>) -> GatewayResult {
        self.calls.lock().unwrap().push(call);
        slot.lock().unwrap().to_result()
    }
}

#[async_trait]
impl BackendGateway for FakeGateway {
    fn base_url(&self) -> &str {
        "http://fake.backend"
    }

    async fn get_jobs(&self, skip: u32, limit: u32) -> GatewayResult {
        self.record(format!("get_jobs {skip} {limit}"), &self.jobs)
    }

    async fn create_job(&self, job: &JobDraft) -> GatewayResult {
        self.record(format!("create_job {}", job.title), &self.create)
    }

    async fn get_candidates(&self, skip: u32, limit: u32) -> GatewayResult {
        self.record(format!("get_candidates {skip} {limit}"), &self.candidates)
    }

    async fn apply_to_job(&self, job_id: &str, resume: &UploadedFile) -> GatewayResult {
        self.record(format!("apply_to_job {job_id} {}", resume.file_name), &self.apply)
    }

    async fn parse_job_document(&self, document: &UploadedFile) -> GatewayResult {
        self.record(format!("parse_job_document {}", document.file_name), &self.parse)
    }

    async fn get_metrics(&self) -> GatewayResult {
        self.record("get_metrics".to_string(), &self.metrics)
    }

    async fn health_check(&self) -> GatewayResult {
        self.record("health_check".to_string(), &self.health)
    }
}

/// Factory that always returns the same shared fake.
pub struct FakeFactory(pub Arc<FakeGateway>);

impl GatewayFactory for FakeFactory {
    fn gateway(&self, _base_url: &str, _use_backend: bool) -> Arc<dyn BackendGateway> {
        self.0.clone()
    }
}
