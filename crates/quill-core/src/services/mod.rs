//! Application services - the call-site protocols over the ports.

mod content;
mod identity;

pub use content::ContentService;
pub use identity::IdentityService;

/// Mask a username for logging to avoid PII in logs.
pub fn mask_username(username: &str) -> String {
    let mut chars = username.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) => format!("{}***", first),
        _ => "***".to_string(),
    }
}
