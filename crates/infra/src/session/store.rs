use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use chrono::Utc;
use thiserror::Error;

use stockdesk_core::SessionId;

use super::Session;

/// Shared handle to one session. A request holds the lock for exactly one interaction.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown session: {0}")]
    Unknown(SessionId),

    #[error("session state poisoned: {0}")]
    Poisoned(SessionId),

    #[error("session registry poisoned")]
    RegistryPoisoned,
}

/// Registry of live sessions.
pub trait SessionStore: Send + Sync {
    /// Open a fresh, empty session.
    fn create(&self) -> Result<SessionHandle, SessionError>;
    /// Look up a session and mark it as active.
    fn get(&self, id: SessionId) -> Option<SessionHandle>;
    /// Drop a session and everything it holds. Returns whether it existed.
    fn remove(&self, id: SessionId) -> bool;
    /// Drop every session not looked up within `max_idle`. Returns how many were dropped.
    fn evict_idle(&self, max_idle: Duration) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Process-local session registry.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<SessionId, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self) -> Result<SessionHandle, SessionError> {
        let id = SessionId::new();
        let handle = Arc::new(Mutex::new(Session::new(id, Utc::now())));

        let mut map = self.inner.write().map_err(|_| SessionError::RegistryPoisoned)?;
        map.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, "session created");
        Ok(handle)
    }

    fn get(&self, id: SessionId) -> Option<SessionHandle> {
        let mut map = self.inner.write().ok()?;
        let entry = map.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.handle.clone())
    }

    fn remove(&self, id: SessionId) -> bool {
        let removed = match self.inner.write() {
            Ok(mut map) => map.remove(&id).is_some(),
            Err(_) => false,
        };
        if removed {
            tracing::info!(session_id = %id, "session closed");
        }
        removed
    }

    fn evict_idle(&self, max_idle: Duration) -> usize {
        let Ok(mut map) = self.inner.write() else {
            return 0;
        };
        let before = map.len();
        map.retain(|id, entry| {
            let keep = entry.last_seen.elapsed() < max_idle;
            if !keep {
                tracing::info!(session_id = %id, "idle session evicted");
            }
            keep
        });
        before - map.len()
    }

    fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b"item_name,category,quantity_in_stock\nWidget,Electronics,4\n";

    fn open(sessions: &dyn SessionStore) -> SessionId {
        sessions.create().unwrap().lock().unwrap().id()
    }

    fn item_count(sessions: &dyn SessionStore, id: SessionId) -> usize {
        sessions.get(id).unwrap().lock().unwrap().store().len()
    }

    #[test]
    fn sessions_are_isolated() {
        let sessions = InMemorySessionStore::new();
        let a = open(&sessions);
        let b = open(&sessions);

        sessions
            .get(a)
            .unwrap()
            .lock()
            .unwrap()
            .import_csv(CSV)
            .unwrap();

        assert_eq!(item_count(&sessions, a), 1);
        assert_eq!(item_count(&sessions, b), 0);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn unknown_and_removed_sessions() {
        let sessions = InMemorySessionStore::new();
        assert!(sessions.get(SessionId::new()).is_none());

        let id = open(&sessions);
        assert!(sessions.remove(id));
        assert!(!sessions.remove(id));
        assert!(sessions.get(id).is_none());
        assert!(sessions.is_empty());
    }

    #[test]
    fn works_through_shared_trait_object() {
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let id = open(sessions.as_ref());
        let reply = sessions
            .get(id)
            .unwrap()
            .lock()
            .unwrap()
            .chat("hello", Utc::now());
        assert!(reply.text.starts_with("Try commands like:"));
    }

    #[test]
    fn create_reports_poisoned_registry() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let poisoner = sessions.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the registry");
        })
        .join();

        assert_eq!(sessions.create().unwrap_err(), SessionError::RegistryPoisoned);
    }

    #[test]
    fn evict_idle_drops_only_stale_sessions() {
        let sessions = InMemorySessionStore::new();
        let active = open(&sessions);
        let stale = open(&sessions);

        std::thread::sleep(Duration::from_millis(40));
        assert!(sessions.get(active).is_some());

        assert_eq!(sessions.evict_idle(Duration::from_millis(20)), 1);
        assert!(sessions.get(active).is_some());
        assert!(sessions.get(stale).is_none());

        assert_eq!(sessions.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(sessions.evict_idle(Duration::ZERO), 1);
        assert!(sessions.is_empty());
    }
}
