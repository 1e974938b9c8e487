use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Comment embedded in a [`super::Post`]. It has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Display name of the commenter.
    pub name: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    /// Create a comment dated now.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            date: Utc::now(),
        }
    }

    pub fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("comment name is required".to_string()));
        }
        if self.text.trim().is_empty() {
            return Err(DomainError::Validation("comment text is required".to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.text.chars().take(15).collect();
        write!(f, "<Comment '{}'>", preview)
    }
}
