use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::session_not_found;
use crate::llm::AnswerError;
use crate::models::{ChatRequest, ChatResponse};
use crate::session::SessionError;
use crate::state::AppState;

const MAX_CHAT_MESSAGE_LEN: usize = 2000;

/// POST /api/sessions/{id}/messages - Ask the assistant one question.
///
/// The session lock is released while the answering service runs, so a
/// second submission in the meantime sees the pending turn and gets 409.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let session = state.session(&id).ok_or_else(session_not_found)?;
    let message = truncate_to_char_boundary(&req.message, MAX_CHAT_MESSAGE_LEN);

    let turn = session
        .lock()
        .submit(&message)
        .map_err(|e| match e {
            SessionError::ResponsePending | SessionError::NotReady(_) => {
                (StatusCode::CONFLICT, e.to_string())
            }
        })?
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Message is required".to_string()))?;

    tracing::debug!("Session {id}: {} sources in context", turn.sources.len());

    // Spawned so the answer is applied even if the client disconnects. The
    // call itself runs in its own task so a panic there still ends the turn.
    let answerer = state.answerer.clone();
    let target = session.clone();
    let prompt = turn.prompt;
    let reply = tokio::spawn(async move {
        let outcome = tokio::spawn(async move { answerer.answer(&prompt).await })
            .await
            .unwrap_or_else(|e| Err(AnswerError::Aborted(e.to_string())));
        let mut guard = target.lock();
        let reply = guard.answer_received(outcome).cloned();
        reply.map(|message| guard.view_message(&message))
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Answer task failed: {e}"),
        )
    })?
    .ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "No pending turn for this answer".to_string(),
        )
    })?;

    Ok(Json(ChatResponse {
        reply,
        sources: turn.sources,
    }))
}

fn truncate_to_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    s.char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= max_len)
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_to_char_boundary("hello", 100), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(3000);
        let result = truncate_to_char_boundary(&long, MAX_CHAT_MESSAGE_LEN);
        assert_eq!(result.len(), MAX_CHAT_MESSAGE_LEN);
    }

    #[test]
    fn test_truncate_unicode_safe() {
        // 4-byte emoji must not be split
        let s = "Hello 🌍 world";
        let result = truncate_to_char_boundary(s, 8);
        assert_eq!(result, "Hello ");
    }
}
