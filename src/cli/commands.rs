//! Handlers for the CLI subcommands.

use crate::api::RegisterRequest;
use crate::config::AuthFlowConfig;
use crate::error::Result;
use crate::session::Session;

use super::{LoginArgs, RegisterArgs};

fn build_session(api_base: Option<&str>) -> Session {
    let mut config = AuthFlowConfig::from_env();
    if let Some(base) = api_base {
        config = config.with_base_url(base);
    }
    Session::new(config)
}

pub async fn handle_register(api_base: Option<&str>, args: &RegisterArgs) -> Result<()> {
    let session = build_session(api_base);
    let user = session
        .register(RegisterRequest {
            name: args.name.clone(),
            email: args.email.clone(),
            password: args.password.clone(),
            confirm_password: args.password.clone(),
        })
        .await?;
    println!("Registered and signed in as {}", user.email);
    Ok(())
}

pub async fn handle_login(api_base: Option<&str>, args: &LoginArgs) -> Result<()> {
    let session = build_session(api_base);
    let user = session.login(&args.email, &args.password).await?;
    println!("Signed in as {}", user.email);
    Ok(())
}

pub async fn handle_me(api_base: Option<&str>) -> Result<()> {
    let session = build_session(api_base);
    match session.restore().await {
        Some(user) => {
            println!("{}", user.email);
            if let Some(name) = &user.name {
                println!("{name}");
            }
            println!("member since {}", user.created_at.format("%Y-%m-%d"));
            Ok(())
        }
        None => {
            println!("Not signed in");
            Ok(())
        }
    }
}

pub async fn handle_status(api_base: Option<&str>) -> Result<()> {
    let session = build_session(api_base);
    session.restore().await;
    println!("session: {}", session.state());
    if let Some(user) = session.current_user() {
        println!("user: {}", user.email);
    }
    Ok(())
}

pub async fn handle_logout(api_base: Option<&str>) -> Result<()> {
    let session = build_session(api_base);
    session.restore().await;
    session.logout().await;
    println!("Signed out");
    Ok(())
}
