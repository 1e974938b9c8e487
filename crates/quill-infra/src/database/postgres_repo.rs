//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbConn, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use quill_core::domain::{Post, Role, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, RoleRepository, UserRepository};
use quill_core::services::mask_username;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::role::{self, Entity as RoleEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::user_role::{self, Entity as UserRoleEntity};
use super::postgres_base::{PostgresBaseRepository, read_err, write_err};

/// PostgreSQL role repository.
pub type PostgresRoleRepository = PostgresBaseRepository<RoleEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepoError> {
        let result = RoleEntity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(read_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Role>, RepoError> {
        let result = RoleEntity::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await
            .map_err(read_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::PublishDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(read_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::PublishDate)
            .all(&self.db)
            .await
            .map_err(read_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL user repository.
///
/// The user row and its ordered role references are written in one
/// transaction.
pub struct PostgresUserRepository {
    pub(crate) db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn load_roles(&self, user_id: Uuid) -> Result<Vec<Role>, RepoError> {
        let rows = UserRoleEntity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(user_role::Column::Position)
            .find_also_related(RoleEntity)
            .all(&self.db)
            .await
            .map_err(read_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, role)| role.map(Into::into))
            .collect())
    }

    async fn hydrate(&self, model: user::Model) -> Result<User, RepoError> {
        let mut user: User = model.into();
        user.roles = self.load_roles(user.id).await?;
        Ok(user)
    }

    async fn write_roles(txn: &DatabaseTransaction, user: &User) -> Result<(), DbErr> {
        UserRoleEntity::delete_many()
            .filter(user_role::Column::UserId.eq(user.id))
            .exec(txn)
            .await?;

        if user.roles.is_empty() {
            return Ok(());
        }

        let rows = user
            .roles
            .iter()
            .enumerate()
            .map(|(position, role)| user_role::ActiveModel {
                user_id: Set(user.id),
                role_id: Set(role.id),
                position: Set(position as i32),
            });

        UserRoleEntity::insert_many(rows)
            .exec_without_returning(txn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_err)?;

        match result {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, entity: User) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(read_err)?;

        let active_model: user::ActiveModel = entity.clone().into();
        let model = active_model.insert(&txn).await.map_err(write_err)?;
        Self::write_roles(&txn, &entity).await.map_err(write_err)?;

        txn.commit().await.map_err(write_err)?;

        let mut saved: User = model.into();
        saved.roles = entity.roles;
        Ok(saved)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(read_err)?;

        let active_model: user::ActiveModel = entity.clone().into();
        let model = active_model.update(&txn).await.map_err(write_err)?;
        Self::write_roles(&txn, &entity).await.map_err(write_err)?;

        txn.commit().await.map_err(write_err)?;

        let mut saved: User = model.into();
        saved.roles = entity.roles;
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(write_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %mask_username(username), "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(read_err)?;

        match result {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }
}
