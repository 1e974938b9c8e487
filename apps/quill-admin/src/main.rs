//! # Quill Admin
//!
//! Administration CLI for the Quill blog: manage roles and users, check
//! credentials, publish and list posts.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod state;
mod telemetry;

use commands::{posts, roles, users};
use config::AdminConfig;
use state::AppState;

/// Quill - blog administration
#[derive(Parser)]
#[command(name = "quill-admin", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list and delete roles
    Roles {
        #[command(subcommand)]
        command: roles::RoleCommands,
    },

    /// Register users, manage their passwords and roles
    Users {
        #[command(subcommand)]
        command: users::UserCommands,
    },

    /// Publish, comment on and list posts
    Posts {
        #[command(subcommand)]
        command: posts::PostCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AdminConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &AdminConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.database.as_ref()).await?;

    match cli.command {
        Commands::Roles { command } => roles::run(&state, command).await,
        Commands::Users { command } => users::run(&state, command).await,
        Commands::Posts { command } => posts::run(&state, command).await,
    }
}
