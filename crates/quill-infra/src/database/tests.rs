#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use crate::database::entity::post::{EmbeddedComments, TagList};
    use crate::database::entity::{post, role, user, user_role};
    use crate::database::postgres_repo::{
        PostgresPostRepository, PostgresRoleRepository, PostgresUserRepository,
    };
    use crate::database::StoreSchema;
    use quill_core::domain::{Comment, Post, Role, User};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

    fn post_model(title: &str, age_days: i64) -> post::Model {
        post::Model {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            text: Some("Body".to_owned()),
            publish_date: (Utc::now() - TimeDelta::days(age_days)).into(),
            user_id: None,
            comments: EmbeddedComments(vec![Comment::new("bob", "Nice post")]),
            tags: TagList(vec!["rust".to_owned()]),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("Test Post", 0);
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].name, "bob");
        assert_eq!(post.tags, vec!["rust"]);
    }

    #[tokio::test]
    async fn test_recent_posts_order_by_publish_date_desc() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model("newer", 0), post_model("older", 3)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.recent(10).await.unwrap();

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["newer", "older"]);

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("ORDER BY"));
        assert!(log.contains("publish_date"));
        assert!(log.contains("DESC"));
    }

    #[tokio::test]
    async fn test_create_duplicate_role_is_constraint_violation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"roles_name_key\"".to_owned(),
            )])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);
        let result = repo.create(Role::new("admin", None).unwrap()).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_find_user_by_username_loads_roles_in_order() {
        let user_id = Uuid::new_v4();
        let admin = role::Model {
            id: Uuid::new_v4(),
            name: "admin".to_owned(),
            description: None,
        };
        let editor = role::Model {
            id: Uuid::new_v4(),
            name: "editor".to_owned(),
            description: Some("Edits posts".to_owned()),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "alice".to_owned(),
                password: b"$argon2id$stub".to_vec(),
            }]])
            .append_query_results(vec![vec![
                (
                    user_role::Model {
                        user_id,
                        role_id: admin.id,
                        position: 0,
                    },
                    admin.clone(),
                ),
                (
                    user_role::Model {
                        user_id,
                        role_id: editor.id,
                        position: 1,
                    },
                    editor.clone(),
                ),
            ]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let user = repo.find_by_username("alice").await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.role_names(), vec!["admin", "editor"]);
        assert!(user.has_role("editor"));
    }

    #[tokio::test]
    async fn test_find_missing_user_by_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn user_row(user: &User) -> user::Model {
        user::Model {
            id: user.id,
            username: user.username.clone(),
            password: user.password.clone(),
        }
    }

    #[tokio::test]
    async fn test_update_user_rewrites_roles_in_order() {
        let editor = Role::new("editor", None).unwrap();
        let admin = Role::new("admin", None).unwrap();
        let mut alice = User::new("alice", b"$argon2id$stub".to_vec());
        alice.add_role(editor.clone());
        alice.add_role(admin.clone());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_row(&alice)]])
            .append_exec_results(vec![exec_ok(1), exec_ok(2)])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let saved = repo.update(alice).await.unwrap();
        assert_eq!(saved.role_names(), vec!["editor", "admin"]);

        let log = format!("{:?}", repo.db.into_transaction_log());
        let delete = log.find(r#"DELETE FROM \"user_roles\""#).unwrap();
        let insert = log.find(r#"INSERT INTO \"user_roles\""#).unwrap();
        assert!(delete < insert);

        let editor_at = log.find(&editor.id.to_string()).unwrap();
        let admin_at = log.find(&admin.id.to_string()).unwrap();
        assert!(insert < editor_at);
        assert!(editor_at < admin_at);
    }

    #[tokio::test]
    async fn test_create_user_without_roles_skips_role_insert() {
        let alice = User::new("alice", b"$argon2id$stub".to_vec());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_row(&alice)]])
            .append_exec_results(vec![exec_ok(0)])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let saved = repo.create(alice.clone()).await.unwrap();
        assert_eq!(saved.id, alice.id);
        assert!(saved.roles.is_empty());

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains(r#"INSERT INTO \"users\""#));
        assert!(log.contains(r#"DELETE FROM \"user_roles\""#));
        assert!(!log.contains(r#"INSERT INTO \"user_roles\""#));
    }

    #[tokio::test]
    async fn test_create_with_missing_author_is_missing_reference() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "insert or update on table \"posts\" violates foreign key constraint".to_owned(),
            )])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = repo
            .create(Post::new("Orphan").authored_by(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(RepoError::MissingReference { .. })));
    }

    #[tokio::test]
    async fn test_blog_schema_creates_tables_in_dependency_order() {
        let schema = StoreSchema::blog();
        assert_eq!(
            schema.table_names(),
            vec!["roles", "users", "user_roles", "posts"]
        );

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results((0..6).map(|_| exec_ok(0)).collect::<Vec<_>>())
            .into_connection();

        schema.create_tables(&db).await.unwrap();

        // four tables, then the two post listing indexes
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 6);
        assert!(format!("{:?}", log[0]).contains("IF NOT EXISTS"));

        let indexes = format!("{:?}", &log[4..]);
        assert!(indexes.contains("CREATE INDEX IF NOT EXISTS"));
        assert!(indexes.contains("publish_date"));
        assert!(indexes.contains("user_id"));
    }

    #[test]
    fn test_register_ignores_repeated_entity() {
        let schema = StoreSchema::new()
            .register::<role::Entity>()
            .register::<role::Entity>();

        assert_eq!(schema.table_names(), vec!["roles"]);
    }
}
