//! Typed facade over the remote auth endpoints.

pub mod types;

pub use types::{AuthResponse, LoginRequest, RefreshResponse, RegisterRequest, User};

use std::sync::Arc;

use crate::error::Result;
use crate::gateway::Gateway;

pub(crate) const REGISTER_PATH: &str = "/auth/register";
pub(crate) const LOGIN_PATH: &str = "/auth/login";
pub(crate) const REFRESH_PATH: &str = "/auth/refresh";
pub(crate) const LOGOUT_PATH: &str = "/auth/logout";
pub(crate) const ME_PATH: &str = "/auth/me";

/// Stateless pass-through exposing the five remote operations.
///
/// Register and login use the unauthenticated channel; `me` and `logout` flow
/// through the renewing pipeline; `refresh` dispatches once without retry so
/// the renewal protocol never re-enters itself.
#[derive(Clone)]
pub struct AuthApi {
    gateway: Arc<Gateway>,
}

impl AuthApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.gateway
            .post_unauthenticated(REGISTER_PATH, request)
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.gateway.post_unauthenticated(LOGIN_PATH, request).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let body = serde_json::json!({ "refreshToken": refresh_token });
        self.gateway.post_once(REFRESH_PATH, &body).await
    }

    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<()> {
        let body = serde_json::json!({ "refreshToken": refresh_token });
        // response body is ignored by contract
        self.gateway.post_no_content(LOGOUT_PATH, &body).await
    }

    pub async fn me(&self) -> Result<User> {
        let response: types::MeResponse = self.gateway.get(ME_PATH).await?;
        Ok(response.user)
    }
}
