//! Role commands.

use anyhow::Result;
use clap::Subcommand;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum RoleCommands {
    /// Create a role
    Create {
        /// Unique role name (at most 64 characters)
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// List roles by name
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a role and remove it from every user
    Delete { name: String },
}

pub async fn run(state: &AppState, command: RoleCommands) -> Result<()> {
    match command {
        RoleCommands::Create { name, description } => {
            let role = state.identity.create_role(&name, description).await?;
            println!("Created role {} ({})", role, role.id);
        }
        RoleCommands::List { json } => {
            let roles = state.identity.list_roles().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&roles)?);
                return Ok(());
            }
            for role in roles {
                match role.description {
                    Some(description) => println!("{}\t{}", role.name, description),
                    None => println!("{}", role.name),
                }
            }
        }
        RoleCommands::Delete { name } => {
            state.identity.delete_role(&name).await?;
            println!("Deleted role {}", name);
        }
    }

    Ok(())
}
