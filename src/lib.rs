//! # wiki-assistant
//!
//! A chat assistant for a static game-modding wiki. Questions are answered
//! by an external language model, grounded in pages retrieved from the
//! wiki's own precomputed index.
//!
//! ## Pipeline
//!
//! ```text
//!                 ┌──────────────┐
//!                 │  User Query  │
//!                 └──────┬───────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │      Tokenize       │
//!             │ lowercase, ≥2 chars │
//!             └──────────┬──────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │  Synonym Expansion  │
//!             │  xp → experience …  │
//!             └──────────┬──────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │  Score every page   │
//!             │ phrase +50, title   │
//!             │ +10/+30, text +1,   │
//!             │ overview +5         │
//!             └──────────┬──────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │  Rank: >0, top 5    │
//!             └──────────┬──────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │  Context + Prompt   │
//!             └──────────┬──────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │  Answering service  │
//!             └──────────┬──────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │ Link class names in │
//!             │ the reply → pages   │
//!             └─────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`search`] - Tokenizer, synonym expansion, document scoring and ranking
//! - [`links`] - Class-name → page url map and the link annotator
//! - [`knowledge`] - Index wire format, loaders, and the in-memory knowledge base
//! - [`llm`] - Context/prompt assembly and the answering service client
//! - [`session`] - Per-widget chat state machine
//! - [`api`] - Axum HTTP handlers for session lifecycle and chat turns
//! - [`config`] - Environment-based configuration
//! - [`state`] - Shared application state holding the loader, answerer, and sessions

pub mod api;
pub mod config;
pub mod knowledge;
pub mod links;
pub mod llm;
pub mod models;
pub mod search;
pub mod session;
pub mod state;
