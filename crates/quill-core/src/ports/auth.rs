//! Authentication ports.

use crate::error::DomainError;

/// Password hashing service.
///
/// Implementations must use a salted, adaptive one-way hash and verify in
/// constant time.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password. The output is the encoded hash bytes.
    fn hash(&self, password: &str) -> Result<Vec<u8>, AuthError>;

    /// Verify a password against a hash produced by [`PasswordService::hash`].
    fn verify(&self, password: &str, hash: &[u8]) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<crate::error::RepoError> for AuthError {
    fn from(err: crate::error::RepoError) -> Self {
        AuthError::Domain(err.into())
    }
}
