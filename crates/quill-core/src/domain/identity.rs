//! Session-facing identity: who the current request acts as.

use super::User;

/// The identity a session collaborator attaches to a request.
///
/// `Anonymous` carries no persisted data; `Authenticated` wraps a stored
/// user record. Transitions (login/logout) are driven by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    /// No suspension or ban state is modeled, so every identity is active.
    pub fn is_active(&self) -> bool {
        true
    }

    pub fn is_anonymous(&self) -> bool {
        !self.is_authenticated()
    }

    /// Stable identifier used to restore the identity across requests.
    /// `None` for the anonymous identity.
    pub fn get_id(&self) -> Option<String> {
        self.user().map(|user| user.id.to_string())
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(user),
        }
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.user().is_some_and(|user| user.has_role(name))
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Identity::Authenticated(user)
    }
}
