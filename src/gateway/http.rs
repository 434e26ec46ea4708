//! Shared HTTP client and response-to-error mapping.

use std::sync::OnceLock;

use crate::error::AuthFlowError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Map a non-2xx response to an error, preferring the server-provided
/// `message` field over the raw body.
pub fn status_to_error(status: u16, body: &str) -> AuthFlowError {
    let message = extract_message(body).unwrap_or_else(|| body.to_string());
    AuthFlowError::api(status, message)
}

fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
