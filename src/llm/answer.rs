//! The answering service as seen by the chat session: a prompt goes in,
//! an answer (or a failure) comes out.

use async_trait::async_trait;
use serde_json::Value;

/// An answer, resolved at the service boundary into one of two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerPayload {
    /// The service returned a bare string.
    Text(String),
    /// The service returned an object carrying `message.content`.
    Structured { content: String },
}

impl AnswerPayload {
    /// Classify a raw JSON reply. Anything that is neither a string nor an
    /// object with a non-empty `message.content` is kept as its JSON text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => AnswerPayload::Text(text),
            other => match other.pointer("/message/content").and_then(Value::as_str) {
                Some(content) if !content.is_empty() => AnswerPayload::Structured {
                    content: content.to_string(),
                },
                _ => {
                    tracing::warn!("Unrecognized answer shape, showing raw reply");
                    AnswerPayload::Text(other.to_string())
                }
            },
        }
    }

    pub fn into_text(self) -> String {
        match self {
            AnswerPayload::Text(text) => text,
            AnswerPayload::Structured { content } => content,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    /// The service is not reachable or not configured.
    #[error("answering service unavailable: {0}")]
    Unavailable(String),
    #[error("answering request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("answering service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode answer: {0}")]
    Decode(#[from] serde_json::Error),
    /// The task running the call died before producing a result.
    #[error("answering task aborted: {0}")]
    Aborted(String),
}

/// Black-box answering capability.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, prompt: &str) -> Result<AnswerPayload, AnswerError>;
}
