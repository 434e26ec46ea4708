//! Session lifecycle orchestration.
//!
//! [`Session`] is the application-facing surface: it owns the authenticated
//! identity, wires the credential store and gateway together, and exposes the
//! lifecycle operations (restore, login, register, logout). Protected
//! application calls share its gateway and therefore its renewal pipeline.

pub mod state;
pub mod validate;

pub use state::{SessionState, StateCell};

use std::sync::{Arc, RwLock};

use crate::api::{AuthApi, AuthResponse, LoginRequest, RegisterRequest, User};
use crate::config::AuthFlowConfig;
use crate::credentials::{CredentialStore, FileRefreshStore, RefreshStore};
use crate::error::Result;
use crate::gateway::Gateway;

pub struct Session {
    api: AuthApi,
    gateway: Arc<Gateway>,
    credentials: Arc<CredentialStore>,
    state: Arc<StateCell>,
    user: RwLock<Option<User>>,
}

impl Session {
    /// Build a session with the default file-backed refresh store.
    pub fn new(config: AuthFlowConfig) -> Self {
        let store: Arc<dyn RefreshStore> = match &config.storage_dir {
            Some(dir) => Arc::new(FileRefreshStore::new(dir.clone())),
            None => Arc::new(FileRefreshStore::new_default()),
        };
        Self::with_store(config, store)
    }

    /// Build a session over a caller-supplied refresh store.
    pub fn with_store(config: AuthFlowConfig, store: Arc<dyn RefreshStore>) -> Self {
        let credentials = Arc::new(CredentialStore::new(store));
        let state = Arc::new(StateCell::new());
        let gateway = Arc::new(Gateway::new(&config, credentials.clone(), state.clone()));
        Self {
            api: AuthApi::new(gateway.clone()),
            gateway,
            credentials,
            state,
            user: RwLock::new(None),
        }
    }

    /// Typed access to the remote auth endpoints, sharing this session's
    /// renewal pipeline.
    pub fn api(&self) -> &AuthApi {
        &self.api
    }

    /// The outbound pipeline, for application calls beyond the auth surface.
    pub fn gateway(&self) -> Arc<Gateway> {
        self.gateway.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().expect("user lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn state(&self) -> SessionState {
        self.state.current()
    }

    /// Best-effort session restoration at startup.
    ///
    /// With no persisted refresh token this returns `None` without touching
    /// the network. Otherwise one renewal and one identity fetch run; any
    /// failure clears all credentials and leaves the session unauthenticated.
    /// Never surfaces an error.
    pub async fn restore(&self) -> Option<User> {
        if self.credentials.refresh().is_none() {
            tracing::debug!("no persisted refresh token, skipping restore");
            return None;
        }
        if self.state.transition(SessionState::Authenticating).is_err() {
            return None;
        }
        match self.try_restore().await {
            Ok(user) => {
                *self.user.write().expect("user lock poisoned") = Some(user.clone());
                let _ = self.state.transition(SessionState::Authenticated);
                tracing::debug!(user_id = %user.id, "session restored");
                Some(user)
            }
            Err(err) => {
                tracing::debug!(error = %err, "session restore failed");
                self.credentials.clear();
                *self.user.write().expect("user lock poisoned") = None;
                let _ = self.state.transition(SessionState::Unauthenticated);
                None
            }
        }
    }

    async fn try_restore(&self) -> Result<User> {
        self.gateway.renew_access().await?;
        self.api.me().await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        validate::login(email, password)?;
        self.state.transition(SessionState::Authenticating)?;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.api.login(&request).await {
            Ok(auth) => Ok(self.establish(auth)),
            Err(err) => {
                let _ = self.state.transition(SessionState::Unauthenticated);
                Err(err)
            }
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        validate::registration(&request)?;
        self.state.transition(SessionState::Authenticating)?;
        match self.api.register(&request).await {
            Ok(auth) => Ok(self.establish(auth)),
            Err(err) => {
                let _ = self.state.transition(SessionState::Unauthenticated);
                Err(err)
            }
        }
    }

    /// End the session. The remote logout call is best-effort: a failure is
    /// logged and swallowed, and local credentials, identity, and state are
    /// cleared unconditionally.
    pub async fn logout(&self) {
        let refresh = self.credentials.refresh();
        if let Err(err) = self.api.logout(refresh.as_deref()).await {
            tracing::debug!(error = %err, "logout call failed, clearing local session anyway");
        }
        self.credentials.clear();
        *self.user.write().expect("user lock poisoned") = None;
        let _ = self.state.transition(SessionState::Unauthenticated);
    }

    fn establish(&self, auth: AuthResponse) -> User {
        self.credentials.set_access(Some(auth.access_token));
        self.credentials.set_refresh(&auth.refresh_token);
        *self.user.write().expect("user lock poisoned") = Some(auth.user.clone());
        let _ = self.state.transition(SessionState::Authenticated);
        auth.user
    }
}
