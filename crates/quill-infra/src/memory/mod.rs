//! In-memory store - used when no database is configured, and in tests.
//!
//! Enforces the same constraints as the relational schema: unique role
//! names and usernames, existing role and author references, cascading
//! role removal and author clearing on delete.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, Role, User, sort_newest_first};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, RoleRepository, UserRepository};

/// Stored form of a user: roles are kept as references.
struct UserRecord {
    id: Uuid,
    username: String,
    password: Vec<u8>,
    role_ids: Vec<Uuid>,
}

#[derive(Default)]
struct Tables {
    roles: HashMap<Uuid, Role>,
    users: HashMap<Uuid, UserRecord>,
    posts: HashMap<Uuid, Post>,
}

impl Tables {
    fn resolve_user(&self, record: &UserRecord) -> User {
        User {
            id: record.id,
            username: record.username.clone(),
            password: record.password.clone(),
            roles: record
                .role_ids
                .iter()
                .filter_map(|id| self.roles.get(id).cloned())
                .collect(),
        }
    }

    fn user_record(&self, user: &User) -> Result<UserRecord, RepoError> {
        let taken = self
            .users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        let mut role_ids: Vec<Uuid> = Vec::with_capacity(user.roles.len());
        for role in &user.roles {
            if !self.roles.contains_key(&role.id) {
                return Err(RepoError::MissingReference {
                    entity_type: "role",
                    id: role.name.clone(),
                });
            }
            if !role_ids.contains(&role.id) {
                role_ids.push(role.id);
            }
        }

        Ok(UserRecord {
            id: user.id,
            username: user.username.clone(),
            password: user.password.clone(),
            role_ids,
        })
    }

    fn check_role(&self, role: &Role) -> Result<(), RepoError> {
        let taken = self
            .roles
            .values()
            .any(|r| r.name == role.name && r.id != role.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "role '{}' already exists",
                role.name
            )));
        }
        Ok(())
    }

    fn check_post(&self, post: &Post) -> Result<(), RepoError> {
        match post.user_id {
            Some(user_id) if !self.users.contains_key(&user_id) => {
                Err(RepoError::MissingReference {
                    entity_type: "user",
                    id: user_id.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// In-memory implementation of every storage port, behind one async
/// `RwLock` so constraint checks and writes are atomic.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Role, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, RepoError> {
        Ok(self.tables.read().await.roles.get(&id).cloned())
    }

    async fn create(&self, role: Role) -> Result<Role, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.roles.contains_key(&role.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.check_role(&role)?;
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, role: Role) -> Result<Role, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.roles.contains_key(&role.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_role(&role)?;
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.roles.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        for user in tables.users.values_mut() {
            user.role_ids.retain(|role_id| *role_id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.roles.values().find(|r| r.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Role>, RepoError> {
        let tables = self.tables.read().await;
        let mut roles: Vec<Role> = tables.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|r| tables.resolve_user(r)))
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        let record = tables.user_record(&user)?;
        let saved = tables.resolve_user(&record);
        tables.users.insert(record.id, record);
        Ok(saved)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        let record = tables.user_record(&user)?;
        let saved = tables.resolve_user(&record);
        tables.users.insert(record.id, record);
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        for post in tables.posts.values_mut() {
            if post.user_id == Some(id) {
                post.user_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|r| r.username == username)
            .map(|r| tables.resolve_user(r)))
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.check_post(&post)?;
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_post(&post)?;
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.tables.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.tables.read().await.posts.values().cloned().collect();
        sort_newest_first(&mut posts);
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .tables
            .read()
            .await
            .posts
            .values()
            .filter(|p| p.user_id == Some(user_id))
            .cloned()
            .collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }
}
