//! One chat widget instance: open/closed, the lazily loaded index, and the
//! conversation.
//!
//! The session itself never awaits. Each asynchronous step is split into a
//! start call and a completion call so a driver can release its lock while
//! the index fetch or the answering call is in flight:
//!
//! ```text
//!   idle ──open()──▶ open-loading ──index_loaded()──▶ ready
//!    ▲                                                  │ ▲
//!    └──────────────close()─────────────────────────────┘ │
//!                               submit()                  │ answer_received()
//!                         ready ─────────▶ awaiting-response
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::knowledge::{IndexError, IndexLoader, KnowledgeBase};
use crate::links::Segment;
use crate::llm::{build_context_block, build_prompt, AnswerError, AnswerPayload, Answerer};
use crate::models::{ConversationMessage, IndexedDocument, MessageView, SessionView, SourceRef};

pub const GREETING: &str =
    "Hello! I am your Modding Assistant. I can read the wiki for you. What do you need?";
pub const UNAVAILABLE_REPLY: &str = "Error: the answering service is not available.";
pub const FAILURE_REPLY: &str = "Sorry, I encountered an error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    OpenLoading,
    Ready,
    AwaitingResponse,
}

/// What the driver has to do after [`ChatSession::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAction {
    /// Fetch the index and report back through [`ChatSession::index_loaded`].
    FetchIndex,
    /// A fetch started by an earlier open is still running.
    FetchPending,
    /// The index is already in memory.
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a response is already pending")]
    ResponsePending,
    #[error("chat is not ready (state: {0:?})")]
    NotReady(SessionState),
}

/// A submitted query, ready to be sent to the answering service.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub prompt: String,
    pub sources: Vec<SourceRef>,
}

pub struct ChatSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
    is_open: bool,
    fetch_in_flight: bool,
    awaiting_response: bool,
    knowledge: Option<KnowledgeBase>,
    messages: Vec<ConversationMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_active: now,
            is_open: false,
            fetch_in_flight: false,
            awaiting_response: false,
            knowledge: None,
            messages: vec![ConversationMessage::assistant(GREETING)],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Last time the widget opened, closed, asked, or was viewed.
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// Whether the session went quiet before `cutoff`. A session with a
    /// fetch or an answer in flight is never idle.
    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        !self.fetch_in_flight && !self.awaiting_response && self.last_active <= cutoff
    }

    pub fn state(&self) -> SessionState {
        if !self.is_open {
            SessionState::Idle
        } else if self.awaiting_response {
            SessionState::AwaitingResponse
        } else if self.fetch_in_flight {
            SessionState::OpenLoading
        } else {
            SessionState::Ready
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn knowledge(&self) -> Option<&KnowledgeBase> {
        self.knowledge.as_ref()
    }

    /// Pages searchable right now; shown while a response is pending.
    pub fn indexed_pages(&self) -> usize {
        self.knowledge.as_ref().map_or(0, KnowledgeBase::len)
    }

    /// Open the widget. The index is fetched at most once per session,
    /// unless a previous fetch failed.
    pub fn open(&mut self) -> OpenAction {
        self.touch();
        self.is_open = true;
        if self.knowledge.is_some() {
            OpenAction::Loaded
        } else if self.fetch_in_flight {
            OpenAction::FetchPending
        } else {
            self.fetch_in_flight = true;
            OpenAction::FetchIndex
        }
    }

    /// Close the widget. Work still in flight is applied when it resolves.
    pub fn close(&mut self) {
        self.touch();
        self.is_open = false;
    }

    /// Complete an index fetch. A failure leaves the session usable without
    /// context; the next `open` retries.
    pub fn index_loaded(&mut self, result: Result<Vec<IndexedDocument>, IndexError>) {
        self.fetch_in_flight = false;
        match result {
            Ok(documents) => {
                if self.knowledge.is_none() {
                    self.knowledge = Some(KnowledgeBase::new(documents));
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load AI index for session {}: {e}", self.id);
            }
        }
    }

    /// Record a user query and build the prompt for it.
    ///
    /// Blank text is ignored (`Ok(None)`). Only one query may be in flight.
    pub fn submit(&mut self, text: &str) -> Result<Option<PendingTurn>, SessionError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if self.awaiting_response {
            return Err(SessionError::ResponsePending);
        }
        let state = self.state();
        if state != SessionState::Ready {
            return Err(SessionError::NotReady(state));
        }
        self.touch();

        self.messages.push(ConversationMessage::user(text));

        let ranked = self
            .knowledge
            .as_ref()
            .map(|kb| kb.retrieve(text))
            .unwrap_or_default();
        let sources = ranked.iter().map(SourceRef::from).collect();
        let context = build_context_block(&ranked);
        let prompt = build_prompt(&context, text);

        self.awaiting_response = true;
        Ok(Some(PendingTurn { prompt, sources }))
    }

    /// Apply the outcome of the answering call as an assistant message.
    ///
    /// Returns `None` when no query was pending.
    pub fn answer_received(
        &mut self,
        outcome: Result<AnswerPayload, AnswerError>,
    ) -> Option<&ConversationMessage> {
        if !self.awaiting_response {
            tracing::warn!("Session {} got an answer with no pending query", self.id);
            return None;
        }
        self.awaiting_response = false;
        self.touch();

        let text = match outcome {
            Ok(payload) => payload.into_text(),
            Err(AnswerError::Unavailable(reason)) => {
                tracing::warn!("Answering service unavailable: {reason}");
                UNAVAILABLE_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!("Answering call failed: {e}");
                FAILURE_REPLY.to_string()
            }
        };
        self.messages.push(ConversationMessage::assistant(text));
        self.messages.last()
    }

    /// Open and, if needed, load the index in one go.
    pub async fn open_with(&mut self, loader: &dyn IndexLoader) -> SessionState {
        if self.open() == OpenAction::FetchIndex {
            let result = loader.load().await;
            self.index_loaded(result);
        }
        self.state()
    }

    /// Submit a query and wait for its answer in one go.
    pub async fn ask(
        &mut self,
        answerer: &dyn Answerer,
        text: &str,
    ) -> Result<Option<&ConversationMessage>, SessionError> {
        let Some(turn) = self.submit(text)? else {
            return Ok(None);
        };
        let outcome = answerer.answer(&turn.prompt).await;
        Ok(self.answer_received(outcome))
    }

    /// Split a message into plain and linked segments.
    pub fn render(&self, message: &ConversationMessage) -> Vec<Segment> {
        match &self.knowledge {
            Some(kb) => kb.annotate(&message.text),
            None if message.text.is_empty() => Vec::new(),
            None => vec![Segment::text(message.text.as_str())],
        }
    }

    pub fn view_message(&self, message: &ConversationMessage) -> MessageView {
        MessageView {
            role: message.role,
            text: message.text.clone(),
            segments: self.render(message),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            state: self.state(),
            created_at: self.created_at,
            indexed_pages: self.indexed_pages(),
            messages: self
                .messages
                .iter()
                .map(|m| self.view_message(m))
                .collect(),
        }
    }
}
