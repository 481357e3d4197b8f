pub mod health;
pub mod jobs;
pub mod sessions;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions and the render pass
        .route(
            "/api/v1/sessions",
            post(sessions::handle_create_session).delete(sessions::handle_end_session),
        )
        .route("/api/v1/view", get(sessions::handle_get_view))
        .route("/api/v1/events", post(sessions::handle_event))
        // Job actions
        .route("/api/v1/jobs", post(jobs::handle_create_job))
        .route("/api/v1/jobs/sync", post(jobs::handle_sync_jobs))
        .route(
            "/api/v1/jobs/parse-document",
            post(jobs::handle_parse_document),
        )
        .route("/api/v1/jobs/apply", post(jobs::handle_apply))
        .route("/api/v1/backend/health", get(jobs::handle_backend_health))
        .fallback(not_found)
        .with_state(state)
}
