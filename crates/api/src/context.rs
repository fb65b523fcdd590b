use stockdesk_core::SessionId;
use stockdesk_infra::{Session, SessionError, SessionHandle};

/// Session context for a request.
///
/// Resolved once by the session middleware and present for all session routes.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: SessionId,
    handle: SessionHandle,
}

impl SessionContext {
    pub fn new(session_id: SessionId, handle: SessionHandle) -> Self {
        Self { session_id, handle }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Run `f` with the session locked for this one interaction.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R, SessionError> {
        let mut session = self
            .handle
            .lock()
            .map_err(|_| SessionError::Poisoned(self.session_id))?;
        Ok(f(&mut *session))
    }
}
