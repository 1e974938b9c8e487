//! Service wiring - picks the storage backend from configuration.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, RoleRepository, UserRepository};
use quill_core::services::{ContentService, IdentityService};
use quill_infra::{Argon2PasswordService, DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConnections, PostgresPostRepository, PostgresRoleRepository, PostgresUserRepository,
    StoreSchema,
};

/// Services the commands run against.
#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
    pub content: ContentService,
}

struct Stores {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    posts: Arc<dyn PostRepository>,
}

impl Stores {
    fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            roles: store.clone(),
            posts: store,
        }
    }
}

impl AppState {
    /// Build the services. Without a configured database everything runs
    /// against the in-memory store and is lost on exit.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        let stores = match db_config {
            Some(config) => Self::database_stores(config).await?,
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Stores::in_memory()
            }
        };

        let hasher: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Ok(Self {
            identity: IdentityService::new(stores.users.clone(), stores.roles, hasher),
            content: ContentService::new(stores.posts, stores.users),
        })
    }

    #[cfg(feature = "postgres")]
    async fn database_stores(config: &DatabaseConfig) -> anyhow::Result<Stores> {
        let connections = DatabaseConnections::init(config, &StoreSchema::blog()).await?;

        Ok(Stores {
            users: Arc::new(PostgresUserRepository::new(connections.share())),
            roles: Arc::new(PostgresRoleRepository::new(connections.share())),
            posts: Arc::new(PostgresPostRepository::new(connections.main)),
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn database_stores(_config: &DatabaseConfig) -> anyhow::Result<Stores> {
        tracing::info!("Running without postgres feature - using in-memory store");
        Ok(Stores::in_memory())
    }
}
