//! Domain entities - the core business objects.

mod comment;
mod identity;
mod post;
mod role;
mod user;

pub use comment::Comment;
pub use identity::Identity;
pub use post::{Post, sort_newest_first};
pub use role::{ROLE_NAME_MAX_LEN, Role};
pub use user::User;
