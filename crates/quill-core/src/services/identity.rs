//! Identity workflows: registration, login, password changes and role
//! administration.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Identity, Role, User};
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService, RoleRepository, UserRepository};

use super::mask_username;

/// Identity service over the user/role stores and a password hasher.
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    hasher: Arc<dyn PasswordService>,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        hasher: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
        }
    }

    /// Create and persist a user with a freshly hashed password.
    ///
    /// Fails with [`DomainError::Duplicate`] if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = User::with_password(username, password, self.hasher.as_ref())?;
        user.validate()?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Duplicate(format!("username '{}'", username)).into());
        }

        let saved = self.users.create(user).await?;
        tracing::info!(user_id = %saved.id, username = %mask_username(username), "User registered");
        Ok(saved)
    }

    /// Look the user up by username, then verify `password` against the
    /// stored record.
    ///
    /// An unknown username and a wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::debug!(username = %mask_username(username), "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.check_password(password, self.hasher.as_ref())? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Identity::Authenticated(user))
    }

    /// Restore an identity from the value previously returned by
    /// [`Identity::get_id`]. Missing, malformed or stale ids are anonymous.
    pub async fn load_identity(&self, session_id: Option<&str>) -> Result<Identity, DomainError> {
        let Some(id) = session_id.and_then(|s| Uuid::parse_str(s).ok()) else {
            return Ok(Identity::Anonymous);
        };

        Ok(self
            .users
            .find_by_id(id)
            .await?
            .map_or(Identity::Anonymous, Identity::Authenticated))
    }

    /// Fail unless `identity` holds the role `name`.
    pub fn require_role(&self, identity: &Identity, name: &str) -> Result<(), AuthError> {
        if identity.has_role(name) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions)
        }
    }

    pub async fn change_password(&self, user_id: Uuid, password: &str) -> Result<User, AuthError> {
        let mut user = self.user(user_id).await?;
        user.set_password(password, self.hasher.as_ref())?;
        let saved = self.users.update(user).await?;
        tracing::info!(user_id = %saved.id, "Password changed");
        Ok(saved)
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.users.delete(user_id).await.map_err(|e| match e {
            crate::error::RepoError::NotFound => DomainError::not_found("user", user_id),
            other => other.into(),
        })
    }

    /// Create a role. Fails with [`DomainError::Duplicate`] if the name is taken.
    pub async fn create_role(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Role, DomainError> {
        let role = Role::new(name, description)?;

        if self.roles.find_by_name(name).await?.is_some() {
            return Err(DomainError::Duplicate(format!("role '{}'", name)));
        }

        let saved = self.roles.create(role).await?;
        tracing::info!(role = %saved.name, "Role created");
        Ok(saved)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, DomainError> {
        Ok(self.roles.list().await?)
    }

    /// Delete a role; it disappears from every user holding it.
    pub async fn delete_role(&self, name: &str) -> Result<(), DomainError> {
        let role = self.role(name).await?;
        self.roles.delete(role.id).await?;
        tracing::info!(role = %name, "Role deleted");
        Ok(())
    }

    /// Grant the role `role_name`. Granting a held role is a no-op.
    pub async fn assign_role(&self, user_id: Uuid, role_name: &str) -> Result<User, DomainError> {
        let role = self.role(role_name).await?;
        let mut user = self.user(user_id).await?;

        if !user.add_role(role) {
            return Ok(user);
        }

        let saved = self.users.update(user).await?;
        tracing::info!(user_id = %saved.id, role = %role_name, "Role assigned");
        Ok(saved)
    }

    /// Revoke the role `role_name`. Revoking a role not held is a no-op.
    pub async fn revoke_role(&self, user_id: Uuid, role_name: &str) -> Result<User, DomainError> {
        let mut user = self.user(user_id).await?;

        if !user.remove_role(role_name) {
            return Ok(user);
        }

        let saved = self.users.update(user).await?;
        tracing::info!(user_id = %saved.id, role = %role_name, "Role revoked");
        Ok(saved)
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_username(username).await?)
    }

    async fn user(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    async fn role(&self, name: &str) -> Result<Role, DomainError> {
        self.roles
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("role", name))
    }
}
