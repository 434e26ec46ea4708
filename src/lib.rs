//! authflow — async client for bearer-token auth APIs.
//!
//! Provides registration, login, logout, and silent session restoration
//! against a remote auth service, plus an authenticated request pipeline that
//! renews the access token transparently. Renewal is single-flight: when
//! several concurrent calls hit an expired token, exactly one refresh call is
//! made and every caller resumes with its outcome.
//!
//! # Quick Start
//!
//! ```no_run
//! use authflow::prelude::*;
//!
//! # async fn example() -> authflow::error::Result<()> {
//! let session = Session::new(AuthFlowConfig::from_env());
//! if session.restore().await.is_none() {
//!     session.login("ada@example.com", "difference-engine").await?;
//! }
//! let user = session.api().me().await?;
//! println!("signed in as {}", user.email);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod prelude;
pub mod session;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
