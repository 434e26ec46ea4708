//! authflow CLI binary entry point.

use clap::Parser;

use authflow::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let api_base = cli.api_base.as_deref();

    let result = match &cli.command {
        Commands::Register(args) => commands::handle_register(api_base, args).await,
        Commands::Login(args) => commands::handle_login(api_base, args).await,
        Commands::Me => commands::handle_me(api_base).await,
        Commands::Status => commands::handle_status(api_base).await,
        Commands::Logout => commands::handle_logout(api_base).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
