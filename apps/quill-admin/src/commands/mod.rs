//! CLI command implementations.

pub mod posts;
pub mod roles;
pub mod users;

use anyhow::{Context, Result};
use quill_core::domain::User;

use crate::state::AppState;

/// Resolve a username to its stored record.
pub(crate) async fn user_by_name(state: &AppState, username: &str) -> Result<User> {
    state
        .identity
        .find_user(username)
        .await?
        .with_context(|| format!("no user named '{}'", username))
}
