use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::knowledge::{IndexLoader, IndexSource, StaticIndexLoader};
use crate::llm::{Answerer, HttpAnswerer};
use crate::session::ChatSession;

pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Shared application state.
///
/// Sessions never share mutable data; each one loads and owns its own
/// knowledge base.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub loader: Arc<dyn IndexLoader>,
    pub answerer: Arc<dyn Answerer>,
    pub sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        let loader = StaticIndexLoader::new(
            IndexSource::parse(&config.index_location),
            http_client.clone(),
        );
        let answerer = HttpAnswerer::new(http_client, config.llm.clone());

        Ok(Self::with_components(
            config,
            Arc::new(loader),
            Arc::new(answerer),
        ))
    }

    pub fn with_components(
        config: Config,
        loader: Arc<dyn IndexLoader>,
        answerer: Arc<dyn Answerer>,
    ) -> Self {
        Self {
            config,
            loader,
            answerer,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn session(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.read().get(id).cloned()
    }

    /// Register a fresh session, or `None` when the limit is reached.
    ///
    /// Widgets that went away without unmounting are evicted first once
    /// they have been idle longer than the configured TTL.
    pub fn create_session(&self) -> Option<SharedSession> {
        let mut sessions = self.sessions.write();
        evict_idle(&mut sessions, self.config.session_idle_ttl());
        if sessions.len() >= self.config.max_sessions {
            return None;
        }
        let session = ChatSession::new();
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, shared.clone());
        Some(shared)
    }

    pub fn remove_session(&self, id: &Uuid) -> bool {
        self.sessions.write().remove(id).is_some()
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, SharedSession>, ttl: std::time::Duration) {
    let Some(cutoff) = chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
    else {
        return;
    };
    let before = sessions.len();
    sessions.retain(|_, session| !session.lock().is_idle_since(cutoff));
    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::info!("Evicted {evicted} idle sessions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(max_sessions: usize, session_idle_secs: u64) -> AppState {
        AppState::new(Config {
            max_sessions,
            session_idle_secs,
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_session_limit_without_eviction() {
        let state = state_with(2, 3600);
        assert!(state.create_session().is_some());
        assert!(state.create_session().is_some());
        assert!(state.create_session().is_none());
    }

    #[test]
    fn test_abandoned_sessions_make_room() {
        let state = state_with(3, 0);
        let first = state.create_session().unwrap();
        let first_id = first.lock().id();
        state.create_session().unwrap();
        state.create_session().unwrap();

        // nobody unmounted, but all three have gone quiet
        let fresh = state.create_session().unwrap();
        assert!(state.session(&first_id).is_none());
        assert!(state.session(&fresh.lock().id()).is_some());
        assert_eq!(state.sessions.read().len(), 1);
    }

    #[test]
    fn test_busy_session_survives_eviction() {
        let state = state_with(1, 0);
        let busy = state.create_session().unwrap();
        let busy_id = {
            let mut session = busy.lock();
            session.open();
            session.index_loaded(Ok(Vec::new()));
            session.submit("how do I add xp").unwrap();
            session.id()
        };

        assert!(state.create_session().is_none());
        assert!(state.session(&busy_id).is_some());
    }

    #[test]
    fn test_remove_session() {
        let state = state_with(4, 3600);
        let id = state.create_session().unwrap().lock().id();
        assert!(state.remove_session(&id));
        assert!(!state.remove_session(&id));
    }
}
