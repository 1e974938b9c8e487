//! Content workflows: publishing, commenting and tagging posts.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Post};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, UserRepository};

#[derive(Clone)]
pub struct ContentService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl ContentService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Validate and store a new post. A set author must exist.
    pub async fn publish(&self, post: Post) -> Result<Post, DomainError> {
        post.validate()?;

        if let Some(user_id) = post.user_id {
            if self.users.find_by_id(user_id).await?.is_none() {
                return Err(DomainError::not_found("user", user_id));
            }
        }

        let saved = self.posts.create(post).await?;
        tracing::info!(post_id = %saved.id, title = %saved.title, "Post published");
        Ok(saved)
    }

    pub async fn comment_on(&self, post_id: Uuid, comment: Comment) -> Result<Post, DomainError> {
        comment.validate()?;

        let mut post = self.post(post_id).await?;
        post.add_comment(comment);
        Ok(self.posts.update(post).await?)
    }

    pub async fn tag(&self, post_id: Uuid, tag: &str) -> Result<Post, DomainError> {
        if tag.trim().is_empty() {
            return Err(DomainError::Validation("tag must not be empty".to_string()));
        }

        let mut post = self.post(post_id).await?;
        if !post.add_tag(tag) {
            return Ok(post);
        }
        Ok(self.posts.update(post).await?)
    }

    /// Newest posts first.
    pub async fn recent(&self, limit: u64) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.recent(limit).await?)
    }

    /// Posts by one author, newest first.
    pub async fn by_author(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_user_id(user_id).await?)
    }

    pub async fn delete_post(&self, post_id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(post_id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("post", post_id),
            other => other.into(),
        })
    }

    async fn post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }
}
