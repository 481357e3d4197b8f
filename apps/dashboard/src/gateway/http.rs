use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::gateway::{
    check_payload, BackendGateway, GatewayError, GatewayFactory, GatewayResult,
    OfflineGateway, Timeouts, UploadKind, UploadedFile,
};
use crate::models::JobDraft;

/// Endpoints probed, in order, by `health_check`.
const HEALTH_PROBES: &[&str] = &["/jobs/", "/"];

/// REST client for the scoring backend.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    timeouts: Timeouts,
}

impl HttpGateway {
    pub fn new(client: Client, base_url: &str, timeouts: Timeouts) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, u32)],
        timeout: Duration,
    ) -> GatewayResult {
        let url = self.url(path);
        debug!("GET {url} {query:?}");
        let request = self.client.get(&url).query(query).timeout(timeout);
        self.send(operation, &url, request).await
    }

    async fn upload(
        &self,
        operation: &'static str,
        path: &str,
        kind: UploadKind,
        file: &UploadedFile,
    ) -> GatewayResult {
        let url = self.url(path);
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type())
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        let form = multipart::Form::new().part(kind.form_field(), part);

        info!(
            "Uploading {} ({} bytes) to {url}",
            file.file_name,
            file.bytes.len()
        );
        let request = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.timeouts.upload);
        self.send(operation, &url, request).await
    }

    async fn send(
        &self,
        operation: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> GatewayResult {
        let response = request
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| classify(e, url))?;

        if !status.is_success() {
            warn!("{operation} returned {status}: {body}");
            // Prefer the backend's JSON detail when there is one
            let body = serde_json::from_str::<Value>(&body)
                .map(|v| v.to_string())
                .unwrap_or(body);
            return Err(GatewayError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => check_payload(payload),
            // Non-JSON success bodies are still successes
            Err(_) => Ok(json!({ "data": body, "status_code": status.as_u16() })),
        }
    }
}

fn classify(error: reqwest::Error, url: &str) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::Connect {
            url: url.to_string(),
        }
    } else {
        GatewayError::Request(error.to_string())
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_jobs(&self, skip: u32, limit: u32) -> GatewayResult {
        self.get(
            "Fetching jobs",
            "/jobs/",
            &[("skip", skip), ("limit", limit)],
            self.timeouts.request,
        )
        .await
    }

    async fn create_job(&self, job: &JobDraft) -> GatewayResult {
        let url = self.url("/jobs/");
        let request = self
            .client
            .post(&url)
            .json(&job.to_backend_body())
            .timeout(self.timeouts.request);
        self.send("Job creation", &url, request).await
    }

    async fn get_candidates(&self, skip: u32, limit: u32) -> GatewayResult {
        let payload = self
            .get(
                "Fetching applications",
                "/applications/",
                &[("skip", skip), ("limit", limit)],
                self.timeouts.upload,
            )
            .await?;
        if let Some(list) = payload.as_array() {
            debug!("Retrieved {} applications", list.len());
        }
        Ok(payload)
    }

    async fn apply_to_job(&self, job_id: &str, resume: &UploadedFile) -> GatewayResult {
        let path = format!("/jobs/{job_id}/apply");
        let result = self
            .upload("Application", &path, UploadKind::Resume, resume)
            .await?;
        let score = result
            .get("relevance_score")
            .cloned()
            .unwrap_or_default();
        info!("Application to job {job_id} accepted, relevance score: {score}");
        Ok(result)
    }

    async fn parse_job_document(&self, document: &UploadedFile) -> GatewayResult {
        UploadKind::JobDocument.validate(document)?;
        self.upload(
            "Document parsing",
            "/jobs/parse-document",
            UploadKind::JobDocument,
            document,
        )
        .await
    }

    async fn get_metrics(&self) -> GatewayResult {
        self.get("Fetching metrics", "/metrics/", &[], self.timeouts.request)
            .await
    }

    async fn health_check(&self) -> GatewayResult {
        let mut last_error = None;
        for endpoint in HEALTH_PROBES {
            match self
                .get("Health check", endpoint, &[], self.timeouts.request)
                .await
            {
                Ok(_) => return Ok(json!({ "status": "healthy", "endpoint": endpoint })),
                Err(e) => last_error = Some(e),
            }
        }
        let last = last_error.map(|e| e.to_string()).unwrap_or_default();
        Err(GatewayError::Backend(format!(
            "Backend connection failed. Last error: {last}"
        )))
    }
}

/// Builds gateways that share one connection pool.
#[derive(Clone)]
pub struct HttpGatewayFactory {
    client: Client,
    timeouts: Timeouts,
}

impl HttpGatewayFactory {
    pub fn new(timeouts: Timeouts) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeouts.request)
            .build()?;
        Ok(Self { client, timeouts })
    }
}

impl GatewayFactory for HttpGatewayFactory {
    fn gateway(&self, base_url: &str, use_backend: bool) -> Arc<dyn BackendGateway> {
        if use_backend {
            Arc::new(HttpGateway::new(self.client.clone(), base_url, self.timeouts))
        } else {
            Arc::new(OfflineGateway::new(base_url))
        }
    }
}
