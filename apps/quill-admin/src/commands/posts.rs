//! Post commands.

use anyhow::Result;
use clap::Subcommand;
use uuid::Uuid;

use quill_core::domain::{Comment, Post};

use super::user_by_name;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum PostCommands {
    /// Publish a post
    Publish {
        title: String,
        #[arg(long)]
        text: Option<String>,
        /// Username of the author
        #[arg(long)]
        author: Option<String>,
        /// Tags to attach
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Comment on a post
    Comment {
        post_id: Uuid,
        /// Display name of the commenter
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
    },

    /// Tag a post
    Tag { post_id: Uuid, tag: String },

    /// List the newest posts
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: u64,
        /// Only posts by this username
        #[arg(long)]
        author: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a post
    Delete { post_id: Uuid },
}

pub async fn run(state: &AppState, command: PostCommands) -> Result<()> {
    match command {
        PostCommands::Publish {
            title,
            text,
            author,
            tags,
        } => {
            let mut post = Post::new(title);
            post.text = text;
            if let Some(username) = author {
                post = post.authored_by(user_by_name(state, &username).await?.id);
            }
            for tag in tags {
                post.add_tag(tag);
            }

            let post = state.content.publish(post).await?;
            println!("Published {} ({})", post, post.id);
        }
        PostCommands::Comment {
            post_id,
            name,
            text,
        } => {
            let post = state
                .content
                .comment_on(post_id, Comment::new(name, text))
                .await?;
            println!("{} now has {} comment(s)", post, post.comments.len());
        }
        PostCommands::Tag { post_id, tag } => {
            let post = state.content.tag(post_id, &tag).await?;
            println!("{} tags: {}", post, post.tags.join(", "));
        }
        PostCommands::Recent {
            limit,
            author,
            json,
        } => {
            let mut posts = match author {
                Some(username) => {
                    let user = user_by_name(state, &username).await?;
                    state.content.by_author(user.id).await?
                }
                None => state.content.recent(limit).await?,
            };
            posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            for post in posts {
                println!(
                    "{}  {}  {}",
                    post.publish_date.to_rfc3339(),
                    post.id,
                    post.title
                );
            }
        }
        PostCommands::Delete { post_id } => {
            state.content.delete_post(post_id).await?;
            println!("Deleted post {}", post_id);
        }
    }

    Ok(())
}
