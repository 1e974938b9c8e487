//! User commands.

use anyhow::Result;
use clap::Subcommand;

use super::user_by_name;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Register {
        username: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check a username/password pair
    Login {
        username: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Set a new password
    Passwd {
        username: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Grant a role
    Grant { username: String, role: String },

    /// Revoke a role
    Revoke { username: String, role: String },

    /// Show a user and their roles
    Show {
        username: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a user; their posts are kept without an author
    Delete { username: String },
}

pub async fn run(state: &AppState, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::Register { username, password } => {
            let user = state.identity.register(&username, &password).await?;
            println!("Registered {} ({})", user, user.id);
        }
        UserCommands::Login { username, password } => {
            let identity = state.identity.authenticate(&username, &password).await?;
            if let Some(id) = identity.get_id() {
                println!("Authenticated {} (session id {})", username, id);
            }
        }
        UserCommands::Passwd { username, password } => {
            let user = user_by_name(state, &username).await?;
            state.identity.change_password(user.id, &password).await?;
            println!("Password changed for {}", user);
        }
        UserCommands::Grant { username, role } => {
            let user = user_by_name(state, &username).await?;
            let user = state.identity.assign_role(user.id, &role).await?;
            println!("{} roles: {}", user, user.role_names().join(", "));
        }
        UserCommands::Revoke { username, role } => {
            let user = user_by_name(state, &username).await?;
            let user = state.identity.revoke_role(user.id, &role).await?;
            println!("{} roles: {}", user, user.role_names().join(", "));
        }
        UserCommands::Show { username, json } => {
            let user = user_by_name(state, &username).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
                return Ok(());
            }
            println!("{} ({})", user, user.id);
            for role in &user.roles {
                println!("  {}", role);
            }
        }
        UserCommands::Delete { username } => {
            let user = user_by_name(state, &username).await?;
            state.identity.delete_user(user.id).await?;
            println!("Deleted {}", user);
        }
    }

    Ok(())
}
