//! CLI entry point for authflow.

pub mod commands;

use clap::{Parser, Subcommand};

/// authflow CLI
#[derive(Parser, Debug)]
#[command(name = "authflow", version, about = "authflow — auth session client")]
pub struct Cli {
    /// Base URL of the auth API (overrides AUTHFLOW_API_BASE)
    #[arg(long)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and start a session
    Register(RegisterArgs),
    /// Login with an existing account
    Login(LoginArgs),
    /// Show the current user
    Me,
    /// Show session status
    Status,
    /// End the current session
    Logout,
}

/// Arguments for `authflow register`.
#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Password (confirmed automatically)
    pub password: String,
}

/// Arguments for `authflow login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}
