use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService};

/// User entity - represents a registered account.
///
/// `password` always holds the encoded output of a [`PasswordService`],
/// never plaintext. It is not serialized.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: Vec<u8>,
    pub roles: Vec<Role>,
}

impl User {
    /// Create a new user with a generated ID from an already hashed password.
    pub fn new(username: impl Into<String>, password_hash: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password: password_hash,
            roles: Vec::new(),
        }
    }

    /// Create a new user, hashing `password` with `hasher`.
    pub fn with_password(
        username: impl Into<String>,
        password: &str,
        hasher: &dyn PasswordService,
    ) -> Result<Self, AuthError> {
        let mut user = Self::new(username, Vec::new());
        user.set_password(password, hasher)?;
        Ok(user)
    }

    /// Replace the stored credential with the hash of `password`.
    ///
    /// Only the in-memory record changes; persist it separately.
    pub fn set_password(
        &mut self,
        password: &str,
        hasher: &dyn PasswordService,
    ) -> Result<(), AuthError> {
        self.password = hasher.hash(password)?;
        Ok(())
    }

    /// Verify `password` against this record's stored hash.
    ///
    /// Call this on the record fetched from storage; see
    /// [`crate::services::IdentityService::authenticate`].
    pub fn check_password(
        &self,
        password: &str,
        hasher: &dyn PasswordService,
    ) -> Result<bool, AuthError> {
        if self.password.is_empty() {
            return Ok(false);
        }
        hasher.verify(password, &self.password)
    }

    /// Whether any held role is named exactly `name` (case-sensitive).
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.name == name)
    }

    /// Append `role` unless a role with the same ID is already held.
    /// Returns whether the role list changed.
    pub fn add_role(&mut self, role: Role) -> bool {
        if self.roles.iter().any(|r| r.id == role.id) {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Remove every role named `name`. Returns whether the role list changed.
    pub fn remove_role(&mut self, name: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|role| role.name != name);
        self.roles.len() != before
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.username.trim().is_empty() {
            return Err(DomainError::Validation("username is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation("password is required".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.role_names())
            .finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User {}>", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reversible stand-in for a real hasher; tests only.
    struct PlainHasher;

    impl PasswordService for PlainHasher {
        fn hash(&self, password: &str) -> Result<Vec<u8>, AuthError> {
            Ok(format!("plain${}", password).into_bytes())
        }

        fn verify(&self, password: &str, hash: &[u8]) -> Result<bool, AuthError> {
            Ok(hash == format!("plain${}", password).as_bytes())
        }
    }

    fn role(name: &str) -> Role {
        Role::new(name, None).unwrap()
    }

    #[test]
    fn test_set_and_check_password() {
        let mut user = User::new("alice", Vec::new());
        user.set_password("s3cret", &PlainHasher).unwrap();

        assert_ne!(user.password, b"s3cret".to_vec());
        assert!(user.check_password("s3cret", &PlainHasher).unwrap());
        assert!(!user.check_password("wrong", &PlainHasher).unwrap());
    }

    #[test]
    fn test_check_password_without_credential() {
        let user = User::new("alice", Vec::new());
        assert!(!user.check_password("", &PlainHasher).unwrap());
    }

    #[test]
    fn test_has_role_is_exact_match() {
        let mut user = User::with_password("alice", "pw", &PlainHasher).unwrap();
        assert!(!user.has_role("admin"));

        user.add_role(role("admin"));
        user.add_role(role("editor"));

        assert!(user.has_role("admin"));
        assert!(user.has_role("editor"));
        assert!(!user.has_role("Admin"));
        assert!(!user.has_role("adm"));
    }

    #[test]
    fn test_add_role_skips_duplicates() {
        let mut user = User::new("alice", Vec::new());
        let admin = role("admin");

        assert!(user.add_role(admin.clone()));
        assert!(!user.add_role(admin));
        assert_eq!(user.roles.len(), 1);
    }

    #[test]
    fn test_remove_role() {
        let mut user = User::new("alice", Vec::new());
        user.add_role(role("admin"));
        user.add_role(role("editor"));

        assert!(user.remove_role("admin"));
        assert!(!user.remove_role("admin"));
        assert_eq!(user.role_names(), vec!["editor"]);
    }

    #[test]
    fn test_validate_requires_username_and_password() {
        let user = User::new("", b"hash".to_vec());
        assert!(matches!(user.validate(), Err(DomainError::Validation(_))));

        let user = User::new("alice", Vec::new());
        assert!(matches!(user.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_debug_and_json_hide_password() {
        let user = User::with_password("alice", "s3cret", &PlainHasher).unwrap();

        let debug = format!("{:?}", user);
        assert!(!debug.contains("s3cret"));

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert_eq!(user.to_string(), "<User alice>");
    }
}
