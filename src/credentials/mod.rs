//! Credential state: volatile access token, durable refresh token.

pub mod store;

pub use store::{FileRefreshStore, RefreshStore};

use std::sync::{Arc, RwLock};

/// Holds the credential pair for one session.
///
/// The access token lives only in process memory and is replaced wholesale on
/// every successful login or renewal. The refresh token is delegated to a
/// [`RefreshStore`]; storage failures degrade to "absent" so a user agent
/// without working persistence falls back to a fresh login instead of
/// crashing.
pub struct CredentialStore {
    access: RwLock<Option<String>>,
    refresh: Arc<dyn RefreshStore>,
}

impl CredentialStore {
    pub fn new(refresh: Arc<dyn RefreshStore>) -> Self {
        Self {
            access: RwLock::new(None),
            refresh,
        }
    }

    /// Replace the in-memory access token. `None` clears it.
    pub fn set_access(&self, token: Option<String>) {
        *self.access.write().expect("access lock poisoned") = token;
    }

    /// Current access token. Read fresh per call; a concurrent renewal may
    /// have replaced it since the caller last looked.
    pub fn access(&self) -> Option<String> {
        self.access.read().expect("access lock poisoned").clone()
    }

    /// Persist a new refresh token, degrading silently on storage failure.
    pub fn set_refresh(&self, token: &str) {
        if let Err(err) = self.refresh.save(token) {
            tracing::warn!(error = %err, "failed to persist refresh token");
        }
    }

    /// Persisted refresh token, or `None` if absent or unreadable.
    pub fn refresh(&self) -> Option<String> {
        match self.refresh.load() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read refresh token");
                None
            }
        }
    }

    /// Delete the persisted refresh token, degrading silently on failure.
    pub fn clear_refresh(&self) {
        if let Err(err) = self.refresh.clear() {
            tracing::warn!(error = %err, "failed to clear refresh token");
        }
    }

    /// Drop both credentials.
    pub fn clear(&self) {
        self.set_access(None);
        self.clear_refresh();
    }
}
