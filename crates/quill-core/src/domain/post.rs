use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Comment;
use crate::error::DomainError;

/// Post entity - represents a blog post.
///
/// Posts own their comments. `user_id` is a non-owning reference to the
/// author and may be unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: Option<String>,
    pub publish_date: DateTime<Utc>,
    pub user_id: Option<Uuid>,
    pub comments: Vec<Comment>,
    pub tags: Vec<String>,
}

impl Post {
    /// Create a new post published now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: None,
            publish_date: Utc::now(),
            user_id: None,
            comments: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn authored_by(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn published_at(mut self, publish_date: DateTime<Utc>) -> Self {
        self.publish_date = publish_date;
        self
    }

    /// Add a tag unless it is already present. Returns whether it was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("post title is required".to_string()));
        }
        self.comments.iter().try_for_each(Comment::validate)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Post '{}'>", self.title)
    }
}

/// Sort posts newest first.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_new_post_defaults() {
        let before = Utc::now();
        let post = Post::new("Hello");

        assert!(post.publish_date >= before);
        assert!(post.text.is_none());
        assert!(post.user_id.is_none());
        assert!(post.comments.is_empty());
        assert!(post.tags.is_empty());
        assert_eq!(post.to_string(), "<Post 'Hello'>");
    }

    #[test]
    fn test_tags_are_set_like() {
        let mut post = Post::new("Hello");
        assert!(post.add_tag("rust"));
        assert!(post.add_tag("blog"));
        assert!(!post.add_tag("rust"));
        assert_eq!(post.tags, vec!["rust", "blog"]);
    }

    #[test]
    fn test_validate_title_and_comments() {
        assert!(Post::new("Hello").validate().is_ok());
        assert!(Post::new("").validate().is_err());

        let mut post = Post::new("Hello");
        post.add_comment(Comment::new("bob", ""));
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_sort_newest_first() {
        let now = Utc::now();
        let mut posts = vec![
            Post::new("old").published_at(now - TimeDelta::days(2)),
            Post::new("new").published_at(now),
            Post::new("mid").published_at(now - TimeDelta::days(1)),
        ];

        sort_newest_first(&mut posts);

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }
}
