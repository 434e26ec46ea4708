//! Outbound pipeline for the protected API surface.
//!
//! Every authenticated call flows through [`Gateway::get`] / [`Gateway::post`]:
//! the current access token is attached fresh per dispatch, an
//! authorization-failure response triggers the renewal protocol, and the
//! original request is replayed at most once with the renewed token.
//!
//! Renewal is single-flight. The first caller to observe a 401 performs the
//! refresh call; callers that fail while it is outstanding park on a oneshot
//! completion handle and are drained with the shared outcome when the refresh
//! settles. A failed renewal clears both credentials and surfaces as
//! [`AuthFlowError::SessionExpired`] to every parked caller.

pub mod http;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::{RefreshResponse, REFRESH_PATH};
use crate::config::AuthFlowConfig;
use crate::credentials::CredentialStore;
use crate::error::{AuthFlowError, Result};
use crate::session::state::{SessionState, StateCell};
use crate::util::with_timeout;
use self::http::{shared_client, status_to_error};

/// Completion handle for a caller suspended on an in-flight renewal.
type Waiter = oneshot::Sender<Result<String>>;

#[derive(Default)]
struct RenewalState {
    in_flight: bool,
    waiters: Vec<Waiter>,
}

pub struct Gateway {
    base_url: String,
    refresh_timeout: Duration,
    credentials: Arc<CredentialStore>,
    state: Arc<StateCell>,
    renewal: Mutex<RenewalState>,
}

impl Gateway {
    pub fn new(
        config: &AuthFlowConfig,
        credentials: Arc<CredentialStore>,
        state: Arc<StateCell>,
    ) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            refresh_timeout: config.refresh_timeout,
            credentials,
            state,
            renewal: Mutex::new(RenewalState::default()),
        }
    }

    /// Authenticated GET with transparent renewal.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    /// Authenticated POST with transparent renewal.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// Authenticated POST whose response body is ignored by contract.
    pub async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// Bearer-attached POST with no retry. The renewal protocol itself uses
    /// this shape; it must never re-enter the 401 handling above.
    pub async fn post_once<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let access = self.credentials.access();
        let response = self
            .dispatch(Method::POST, path, Some(&body), access.as_deref())
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// POST on the unauthenticated channel (register, login).
    pub async fn post_unauthenticated<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.dispatch(Method::POST, path, Some(&body), None).await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let request_id = Uuid::new_v4();
        let access = self.credentials.access();
        tracing::debug!(request_id = %request_id, %method, path, "dispatching api request");

        let response = self
            .dispatch(method.clone(), path, body.as_ref(), access.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check_status(response).await;
        }

        // exactly one retry per original request
        tracing::debug!(request_id = %request_id, path, "authorization failure, renewing access token");
        let fresh = self.renew_access().await?;
        let response = self
            .dispatch(method, path, body.as_ref(), Some(&fresh))
            .await?;
        // a second 401 surfaces to the caller as-is
        check_status(response).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        access: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = shared_client().request(method, url);
        if let Some(token) = access {
            request = request.bearer_auth(token);
        }
        if let Some(json) = body {
            request = request.json(json);
        }
        Ok(request.send().await?)
    }

    /// Run the renewal protocol, or join one already in flight, and return
    /// the fresh access token. Failure means the session is over: both
    /// credentials are cleared and every caller parked on this renewal
    /// observes the same [`AuthFlowError::SessionExpired`].
    pub async fn renew_access(&self) -> Result<String> {
        let waiter = {
            let mut renewal = self.renewal.lock().expect("renewal lock poisoned");
            if renewal.in_flight {
                let (tx, rx) = oneshot::channel();
                renewal.waiters.push(tx);
                Some(rx)
            } else {
                renewal.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            return match rx.await {
                Ok(outcome) => outcome,
                // the renewing task was dropped before settling
                Err(_) => Err(AuthFlowError::SessionExpired(
                    "renewal abandoned before settling".to_string(),
                )),
            };
        }

        let guard = RenewalGuard {
            renewal: &self.renewal,
            settled: false,
        };
        let outcome = self.refresh_once().await.map_err(|err| match err {
            AuthFlowError::SessionExpired(message) => message,
            other => other.to_string(),
        });

        // The flag drops before the queue drains, so the next authorization
        // failure can start a fresh renewal.
        for waiter in guard.settle() {
            let _ = waiter.send(match &outcome {
                Ok(token) => Ok(token.clone()),
                Err(message) => Err(AuthFlowError::SessionExpired(message.clone())),
            });
        }

        outcome.map_err(AuthFlowError::SessionExpired)
    }

    fn take_waiters(renewal: &Mutex<RenewalState>) -> Vec<Waiter> {
        match renewal.lock() {
            Ok(mut renewal) => {
                renewal.in_flight = false;
                std::mem::take(&mut renewal.waiters)
            }
            Err(_) => Vec::new(),
        }
    }

    async fn refresh_once(&self) -> Result<String> {
        // Refreshing is only a session-visible phase when entered from
        // Authenticated; renewal on an anonymous call skips the state cell.
        let refreshing = self.state.transition(SessionState::Refreshing).is_ok();
        let result = self.exchange_refresh_token().await;
        if refreshing {
            let next = if result.is_ok() {
                SessionState::Authenticated
            } else {
                SessionState::Unauthenticated
            };
            let _ = self.state.transition(next);
        }
        result
    }

    async fn exchange_refresh_token(&self) -> Result<String> {
        let Some(refresh_token) = self.credentials.refresh() else {
            self.credentials.clear_refresh();
            return Err(AuthFlowError::SessionExpired("no refresh token".to_string()));
        };

        let call = async {
            let body = serde_json::json!({ "refreshToken": refresh_token });
            let access = self.credentials.access();
            let response = self
                .dispatch(Method::POST, REFRESH_PATH, Some(&body), access.as_deref())
                .await?;
            let response = check_status(response).await?;
            Ok(response.json::<RefreshResponse>().await?)
        };

        match with_timeout(self.refresh_timeout, call).await {
            Ok(refreshed) => {
                self.credentials
                    .set_access(Some(refreshed.access_token.clone()));
                if let Some(rotated) = refreshed.refresh_token.as_deref() {
                    self.credentials.set_refresh(rotated);
                }
                tracing::debug!("access token renewed");
                Ok(refreshed.access_token)
            }
            Err(err) => {
                tracing::debug!(error = %err, "refresh failed, clearing session credentials");
                self.credentials.clear();
                Err(err)
            }
        }
    }
}

/// Clears the in-flight flag and drains the waiter queue exactly once, even
/// if the renewing task is cancelled mid-refresh. Dropping the handles wakes
/// every parked caller with a closed channel.
struct RenewalGuard<'a> {
    renewal: &'a Mutex<RenewalState>,
    settled: bool,
}

impl RenewalGuard<'_> {
    fn settle(mut self) -> Vec<Waiter> {
        self.settled = true;
        Gateway::take_waiters(self.renewal)
    }
}

impl Drop for RenewalGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            drop(Gateway::take_waiters(self.renewal));
        }
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_to_error(status.as_u16(), &body))
}
