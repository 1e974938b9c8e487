#![cfg(feature = "auth")]

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Comment, Post};
use quill_core::services::{ContentService, IdentityService};
use quill_infra::{Argon2PasswordService, InMemoryStore};

fn services() -> (IdentityService, ContentService) {
    let store = Arc::new(InMemoryStore::new());
    let identity = IdentityService::new(
        store.clone(),
        store.clone(),
        Arc::new(Argon2PasswordService::new()),
    );
    let content = ContentService::new(store.clone(), store);
    (identity, content)
}

#[tokio::test]
async fn test_default_publish_date_and_newest_first() {
    let (_, content) = services();

    let before = Utc::now();
    let first = content.publish(Post::new("First")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = content.publish(Post::new("Second")).await.unwrap();

    assert!(first.publish_date >= before);
    assert!(second.publish_date > first.publish_date);

    let recent = content.recent(10).await.unwrap();
    let titles: Vec<_> = recent.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_posts_by_author() {
    let (identity, content) = services();
    let alice = identity.register("alice", "pw").await.unwrap();
    let bob = identity.register("bob", "pw").await.unwrap();
    let now = Utc::now();

    content
        .publish(
            Post::new("Old")
                .authored_by(alice.id)
                .published_at(now - TimeDelta::days(1)),
        )
        .await
        .unwrap();
    content
        .publish(Post::new("New").authored_by(alice.id).published_at(now))
        .await
        .unwrap();
    content
        .publish(Post::new("Other").authored_by(bob.id))
        .await
        .unwrap();

    let posts = content.by_author(alice.id).await.unwrap();
    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "Old"]);
}

#[tokio::test]
async fn test_publish_requires_title_and_known_author() {
    let (_, content) = services();

    assert!(matches!(
        content.publish(Post::new("")).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        content
            .publish(Post::new("Orphan").authored_by(Uuid::new_v4()))
            .await,
        Err(DomainError::NotFound {
            entity_type: "user",
            ..
        })
    ));
}

#[tokio::test]
async fn test_comments_and_tags() {
    let (_, content) = services();
    let post = content
        .publish(Post::new("Hello").with_text("World"))
        .await
        .unwrap();

    content
        .comment_on(post.id, Comment::new("bob", "First!"))
        .await
        .unwrap();
    content
        .comment_on(post.id, Comment::new("carol", "Second."))
        .await
        .unwrap();
    content.tag(post.id, "rust").await.unwrap();
    let post = content.tag(post.id, "rust").await.unwrap();

    assert_eq!(post.tags, vec!["rust"]);
    let names: Vec<_> = post.comments.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["bob", "carol"]);

    assert!(matches!(
        content.comment_on(post.id, Comment::new("", "anon")).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        content
            .comment_on(Uuid::new_v4(), Comment::new("bob", "lost"))
            .await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_deleting_author_keeps_posts() {
    let (identity, content) = services();
    let alice = identity.register("alice", "pw").await.unwrap();
    let post = content
        .publish(Post::new("Hello").authored_by(alice.id))
        .await
        .unwrap();

    identity.delete_user(alice.id).await.unwrap();

    let recent = content.recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, post.id);
    assert_eq!(recent[0].user_id, None);
}

#[tokio::test]
async fn test_delete_post() {
    let (_, content) = services();
    let post = content.publish(Post::new("Bye")).await.unwrap();

    content.delete_post(post.id).await.unwrap();

    assert!(content.recent(10).await.unwrap().is_empty());
    assert!(matches!(
        content.delete_post(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}
