//! SeaORM entities.

pub mod post;
pub mod role;
pub mod user;
pub mod user_role;
