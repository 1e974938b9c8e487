use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, Role, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Fails with [`RepoError::Constraint`] when a
    /// unique field is already taken, and with [`RepoError::MissingReference`]
    /// when it points at a row that does not exist.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Last write wins.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Role repository.
#[async_trait]
pub trait RoleRepository: BaseRepository<Role, Uuid> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepoError>;

    /// All roles, ordered by name.
    async fn list(&self) -> Result<Vec<Role>, RepoError>;
}

/// User repository with domain-specific methods.
///
/// Users are loaded together with their roles, in assignment order.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Listings are ordered newest first by `publish_date`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
