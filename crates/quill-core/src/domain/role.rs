use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum length of a role name, in characters.
pub const ROLE_NAME_MAX_LEN: usize = 64;

/// Role entity - a named permission group that users can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl Role {
    /// Create a new role with a generated ID.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, DomainError> {
        let role = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
        };
        role.validate()?;
        Ok(role)
    }

    /// Check required fields and the name length limit.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("role name is required".to_string()));
        }
        if self.name.chars().count() > ROLE_NAME_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "role name exceeds {} characters",
                ROLE_NAME_MAX_LEN
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
