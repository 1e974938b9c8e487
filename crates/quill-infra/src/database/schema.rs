//! Explicit entity registration.
//!
//! The set of persisted entities is a value built at startup and handed to
//! [`super::DatabaseConnections::init`], not a process-wide registry.

use sea_orm::sea_query::{IndexCreateStatement, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{post, role, user, user_role};

type TableBuilder = fn(&Schema) -> (TableCreateStatement, Vec<IndexCreateStatement>);

/// Ordered list of entities whose tables the store needs.
///
/// Registration order is creation order, so referenced tables come first.
#[derive(Clone, Default)]
pub struct StoreSchema {
    tables: Vec<(String, TableBuilder)>,
}

impl StoreSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The blog schema: roles, users, their role references, posts.
    pub fn blog() -> Self {
        Self::new()
            .register::<role::Entity>()
            .register::<user::Entity>()
            .register::<user_role::Entity>()
            .register::<post::Entity>()
    }

    pub fn register<E: EntityTrait>(mut self) -> Self {
        let name = E::default().table_name().to_string();
        if !self.tables.iter().any(|(n, _)| *n == name) {
            self.tables.push((name, table_for::<E>));
        }
        self
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Issue `CREATE TABLE IF NOT EXISTS` for every registered entity,
    /// followed by its `CREATE INDEX IF NOT EXISTS` statements.
    pub async fn create_tables(&self, db: &DbConn) -> Result<(), DbErr> {
        let backend = db.get_database_backend();
        let schema = Schema::new(backend);

        for (name, build) in &self.tables {
            let (mut table, indexes) = build(&schema);
            table.if_not_exists();
            db.execute(backend.build(&table)).await?;

            for mut index in indexes {
                index.if_not_exists();
                db.execute(backend.build(&index)).await?;
            }
            tracing::debug!(table = %name, "Table ensured");
        }

        Ok(())
    }
}

fn table_for<E: EntityTrait>(schema: &Schema) -> (TableCreateStatement, Vec<IndexCreateStatement>) {
    (
        schema.create_table_from_entity(E::default()),
        schema.create_index_from_entity(E::default()),
    )
}
