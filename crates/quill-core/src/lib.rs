//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Identity (roles, users, session identity) and content (posts, comments)
//! models, the ports their storage and hashing collaborators implement, and
//! the services that drive them. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
