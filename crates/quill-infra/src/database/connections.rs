#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr, SqlxPostgresConnector};

#[cfg(feature = "postgres")]
use super::StoreSchema;

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every SQL statement through sqlx.
    pub sql_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            sql_logging: false,
        }
    }
}

/// Connection to the blog database, with its schema ensured.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Connect and create any table of `schema` that does not exist yet.
    pub async fn init(config: &DatabaseConfig, schema: &StoreSchema) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(config.sql_logging)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        schema.create_tables(&main).await?;

        Ok(Self { main })
    }

    /// Another handle on the same pool, for one more repository.
    pub fn share(&self) -> DbConn {
        SqlxPostgresConnector::from_sqlx_postgres_pool(
            self.main.get_postgres_connection_pool().clone(),
        )
    }
}
