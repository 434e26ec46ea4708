//! Explicit session lifecycle state.

use std::sync::RwLock;

use strum::Display;

use crate::error::{AuthFlowError, Result};

/// Lifecycle phase of the client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Refreshing,
}

impl SessionState {
    /// Legality table for phase transitions. `Refreshing` is reachable only
    /// from `Authenticated`, and never from itself.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Unauthenticated, Unauthenticated)
                | (Unauthenticated, Authenticating)
                | (Authenticating, Authenticated)
                | (Authenticating, Unauthenticated)
                | (Authenticated, Authenticated)
                | (Authenticated, Authenticating)
                | (Authenticated, Refreshing)
                | (Authenticated, Unauthenticated)
                | (Refreshing, Authenticated)
                | (Refreshing, Unauthenticated)
        )
    }
}

/// Process-wide session phase, shared by the session manager and the gateway.
///
/// Transitions are validated; an illegal move leaves the state untouched and
/// returns [`AuthFlowError::InvalidState`].
pub struct StateCell {
    inner: RwLock<SessionState>,
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCell {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SessionState::Unauthenticated),
        }
    }

    pub fn current(&self) -> SessionState {
        *self.inner.read().expect("state lock poisoned")
    }

    /// Move to `next`, returning the previous state.
    pub fn transition(&self, next: SessionState) -> Result<SessionState> {
        let mut current = self.inner.write().expect("state lock poisoned");
        if !current.can_transition_to(next) {
            return Err(AuthFlowError::InvalidState(format!(
                "illegal session transition {current} -> {next}"
            )));
        }
        let previous = *current;
        *current = next;
        Ok(previous)
    }
}
