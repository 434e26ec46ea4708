//! Convenience re-exports for common use.

pub use crate::api::{AuthApi, LoginRequest, RegisterRequest, User};
pub use crate::config::AuthFlowConfig;
pub use crate::credentials::{CredentialStore, FileRefreshStore, RefreshStore};
pub use crate::error::{AuthFlowError, Result};
pub use crate::gateway::Gateway;
pub use crate::session::{Session, SessionState};
