use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::links::Segment;

/// One page of the wiki as shipped in the static AI index.
///
/// The index uses abbreviated keys on the wire (`u`, `t`, `c`); unknown
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedDocument {
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "u")]
    pub url: String,
    #[serde(rename = "c")]
    pub content: String,
}

impl IndexedDocument {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// A document paired with its relevance for the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredDocument<'a> {
    pub document: &'a IndexedDocument,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat turn (user or assistant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub text: String,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Page that contributed to the context of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
    pub score: u32,
}

impl From<&ScoredDocument<'_>> for SourceRef {
    fn from(scored: &ScoredDocument<'_>) -> Self {
        Self {
            title: scored.document.title.clone(),
            url: scored.document.url.clone(),
            score: scored.score,
        }
    }
}

/// Chat request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// A message as rendered for the client, with entity names linked.
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub role: Role,
    pub text: String,
    pub segments: Vec<Segment>,
}

/// Snapshot of one chat session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: crate::session::SessionState,
    pub created_at: DateTime<Utc>,
    /// Number of wiki pages searchable in this session (0 until loaded).
    pub indexed_pages: usize,
    pub messages: Vec<MessageView>,
}

/// Chat response for a single submitted turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: MessageView,
    pub sources: Vec<SourceRef>,
}
