use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::{transition, SessionHandle, SessionId, SessionState, UiEvent};
use crate::state::AppState;
use crate::view::View;

pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
    pub view: View,
}

pub fn session_id(headers: &HeaderMap) -> Result<SessionId, AppError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .ok_or(AppError::MissingSession)
}

/// Resolves the session named by the request headers.
pub async fn session_handle(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(SessionId, SessionHandle), AppError> {
    let id = session_id(headers)?;
    let handle = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::SessionNotFound(id.to_string()))?;
    Ok((id, handle))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let (session_id, handle) = state
        .sessions
        .create(SessionState::new(state.config.use_backend))
        .await;
    let mut session = handle.lock().await;
    let view = state.dashboard_for(&session).render_pass(&mut session).await;
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id, view })))
}

/// DELETE /api/v1/sessions
pub async fn handle_end_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let id = session_id(&headers)?;
    if !state.sessions.remove(&id).await {
        return Err(AppError::SessionNotFound(id.to_string()));
    }
    info!("Session {id} ended");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/view
pub async fn handle_get_view(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<View>, AppError> {
    let (_, handle) = session_handle(&state, &headers).await?;
    let mut session = handle.lock().await;
    let view = state.dashboard_for(&session).render_pass(&mut session).await;
    Ok(Json(view))
}

/// POST /api/v1/events
pub async fn handle_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<UiEvent>,
) -> Result<Json<View>, AppError> {
    let (_, handle) = session_handle(&state, &headers).await?;
    let mut session = handle.lock().await;
    transition(&mut session, event);
    // Built after the event so backend setting changes apply right away
    let view = state.dashboard_for(&session).render_pass(&mut session).await;
    Ok(Json(view))
}
