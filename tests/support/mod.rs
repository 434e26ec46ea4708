#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use wiremock::MockServer;

use authflow::api::AuthApi;
use authflow::config::AuthFlowConfig;
use authflow::credentials::{CredentialStore, RefreshStore};
use authflow::error::AuthFlowError;
use authflow::gateway::Gateway;
use authflow::session::{Session, StateCell};

#[derive(Default)]
pub struct InMemoryRefreshStore {
    token: Mutex<Option<String>>,
}

impl InMemoryRefreshStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, token: &str) {
        *self.token.lock().expect("store lock poisoned") = Some(token.to_string());
    }

    pub fn get(&self) -> Option<String> {
        self.token.lock().expect("store lock poisoned").clone()
    }
}

impl RefreshStore for InMemoryRefreshStore {
    fn load(&self) -> Result<Option<String>, AuthFlowError> {
        Ok(self.get())
    }

    fn save(&self, token: &str) -> Result<(), AuthFlowError> {
        self.seed(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthFlowError> {
        *self.token.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

pub fn config_for(server: &MockServer) -> AuthFlowConfig {
    AuthFlowConfig::builder()
        .base_url(server.uri())
        .refresh_timeout(Duration::from_secs(2))
        .build()
}

pub fn session_with(server: &MockServer, store: Arc<InMemoryRefreshStore>) -> Session {
    Session::with_store(config_for(server), store)
}

/// Gateway and facade wired over an in-memory store, bypassing the session
/// layer so tests can seed credentials directly.
pub struct Harness {
    pub store: Arc<InMemoryRefreshStore>,
    pub credentials: Arc<CredentialStore>,
    pub state: Arc<StateCell>,
    pub gateway: Arc<Gateway>,
    pub api: AuthApi,
}

pub fn harness(server: &MockServer) -> Harness {
    harness_with_config(config_for(server))
}

pub fn harness_with_config(config: AuthFlowConfig) -> Harness {
    let store = Arc::new(InMemoryRefreshStore::new());
    let credentials = Arc::new(CredentialStore::new(store.clone()));
    let state = Arc::new(StateCell::new());
    let gateway = Arc::new(Gateway::new(&config, credentials.clone(), state.clone()));
    let api = AuthApi::new(gateway.clone());
    Harness {
        store,
        credentials,
        state,
        gateway,
        api,
    }
}

pub fn user_json() -> serde_json::Value {
    serde_json::json!({
        "_id": "64f1c0ffee",
        "email": "ada@example.com",
        "name": "Ada",
        "createdAt": "2024-05-01T12:00:00Z"
    })
}

pub fn auth_response_json(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "accessToken": access,
        "refreshToken": refresh,
        "user": user_json()
    })
}
