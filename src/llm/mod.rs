//! Prompt assembly and the external answering service.

pub mod answer;
pub mod client;
pub mod prompt;

pub use answer::{AnswerError, AnswerPayload, Answerer};
pub use client::HttpAnswerer;
pub use prompt::{build_context_block, build_prompt};
