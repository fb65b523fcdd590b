use std::sync::Arc;

use stockdesk_infra::{InMemorySessionStore, SessionStore};

/// Shared application services.
pub struct AppServices {
    sessions: Arc<dyn SessionStore>,
}

impl AppServices {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySessionStore::new()))
    }

    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }
}
