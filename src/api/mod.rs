//! HTTP surface: one server-side chat session per mounted widget.

pub mod chat;
pub mod sessions;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/api/sessions/{id}/open", post(sessions::open_session))
        .route("/api/sessions/{id}/close", post(sessions::close_session))
        .route("/api/sessions/{id}/messages", post(chat::post_message))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) fn session_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Session not found".to_string())
}
