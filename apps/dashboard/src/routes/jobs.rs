use axum::{
    extract::{multipart::Field, Multipart, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::gateway::{UploadKind, UploadedFile};
use crate::routes::sessions::session_handle;
use crate::session::{transition, FormField, JobFormFields, UiEvent};
use crate::state::AppState;
use crate::view::View;

async fn read_upload(field: Field<'_>) -> Result<UploadedFile, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await?;
    debug!("Received upload '{file_name}' ({} bytes)", bytes.len());
    let mut upload = UploadedFile::new(file_name, bytes);
    upload.content_type = content_type;
    Ok(upload)
}

/// POST /api/v1/jobs
/// Optional JSON body overwrites the typed form fields before submitting.
/// A body that is present but not a complete form is rejected.
pub async fn handle_create_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<View>, AppError> {
    let (_, handle) = session_handle(&state, &headers).await?;
    let fields = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let fields = serde_json::from_slice::<JobFormFields>(&body)
            .map_err(|e| AppError::Validation(format!("Invalid job form: {e}")))?;
        Some(fields)
    };

    let mut session = handle.lock().await;
    if let Some(fields) = fields {
        for (field, text) in [
            (FormField::Title, fields.title),
            (FormField::Department, fields.department),
            (FormField::Description, fields.description),
            (FormField::Requirements, fields.requirements),
        ] {
            transition(&mut session, UiEvent::EditForm { field, text });
        }
    }
    let dashboard = state.dashboard_for(&session);
    dashboard.create_job(&mut session).await;
    Ok(Json(dashboard.render_pass(&mut session).await))
}

/// POST /api/v1/jobs/sync
pub async fn handle_sync_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<View>, AppError> {
    let (_, handle) = session_handle(&state, &headers).await?;
    let mut session = handle.lock().await;
    let dashboard = state.dashboard_for(&session);
    dashboard.sync_jobs(&mut session).await;
    Ok(Json(dashboard.render_pass(&mut session).await))
}

/// POST /api/v1/jobs/parse-document
pub async fn handle_parse_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<View>, AppError> {
    let (_, handle) = session_handle(&state, &headers).await?;

    let form_field = UploadKind::JobDocument.form_field();
    let mut document = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(form_field) {
            document = Some(read_upload(field).await?);
        }
    }
    let document =
        document.ok_or_else(|| AppError::Validation(format!("'{form_field}' file is required")))?;

    let mut session = handle.lock().await;
    let dashboard = state.dashboard_for(&session);
    dashboard.parse_document(&mut session, document).await;
    Ok(Json(dashboard.render_pass(&mut session).await))
}

/// POST /api/v1/jobs/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<View>, AppError> {
    let (_, handle) = session_handle(&state, &headers).await?;

    let resume_field = UploadKind::Resume.form_field();
    let mut job_title = None;
    let mut resume = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "job_title" {
            job_title = Some(field.text().await?);
        } else if name == resume_field {
            resume = Some(read_upload(field).await?);
        }
    }
    let job_title = job_title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("'job_title' is required".to_string()))?;
    let resume =
        resume.ok_or_else(|| AppError::Validation(format!("'{resume_field}' file is required")))?;

    let mut session = handle.lock().await;
    let dashboard = state.dashboard_for(&session);
    dashboard
        .submit_application(&mut session, &job_title, resume)
        .await;
    Ok(Json(dashboard.render_pass(&mut session).await))
}

/// GET /api/v1/backend/health
pub async fn handle_backend_health(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<View>, AppError> {
    let (_, handle) = session_handle(&state, &headers).await?;
    let mut session = handle.lock().await;
    let dashboard = state.dashboard_for(&session);
    dashboard.test_connection(&mut session).await;
    Ok(Json(dashboard.render_pass(&mut session).await))
}
