use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::session_not_found;
use crate::models::SessionView;
use crate::session::OpenAction;
use crate::state::AppState;

/// POST /api/sessions - Mount a new chat widget
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), (StatusCode, String)> {
    let session = state.create_session().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!(
                "Maximum number of sessions ({}) reached",
                state.config.max_sessions
            ),
        )
    })?;
    let view = session.lock().view();
    tracing::info!("Session {} created", view.id);
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/sessions/{id} - Current state and conversation
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, (StatusCode, String)> {
    let session = state.session(&id).ok_or_else(session_not_found)?;
    let mut guard = session.lock();
    guard.touch();
    Ok(Json(guard.view()))
}

/// DELETE /api/sessions/{id} - Unmount the widget and drop its state
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !state.remove_session(&id) {
        return Err(session_not_found());
    }
    tracing::info!("Session {id} removed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sessions/{id}/open - Open the widget, loading the index on
/// first use
pub async fn open_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, (StatusCode, String)> {
    let session = state.session(&id).ok_or_else(session_not_found)?;

    let action = session.lock().open();
    if action == OpenAction::FetchIndex {
        // Spawned so the fetch still lands if the client goes away.
        let loader = state.loader.clone();
        let target = session.clone();
        tokio::spawn(async move {
            let result = loader.load().await;
            target.lock().index_loaded(result);
        })
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Index load task failed: {e}"),
            )
        })?;
    }

    let view = session.lock().view();
    Ok(Json(view))
}

/// POST /api/sessions/{id}/close - Close the widget
pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, (StatusCode, String)> {
    let session = state.session(&id).ok_or_else(session_not_found)?;
    let mut guard = session.lock();
    guard.close();
    Ok(Json(guard.view()))
}
