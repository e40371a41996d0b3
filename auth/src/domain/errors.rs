use thiserror::Error;

use crate::jwt::JwtError;
use crate::jwt::Unauthorized;
use crate::password::PasswordError;

/// Error for persistence operations behind the repository ports
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Duplicate entry: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Top-level error for all authentication operations
///
/// The first four variants are the only ones a caller should surface to end
/// users; their messages intentionally reveal nothing about which check failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("User not found")]
    UserNotFound,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<Unauthorized> for AuthError {
    fn from(_: Unauthorized) -> Self {
        AuthError::Unauthorized
    }
}

impl AuthError {
    /// HTTP status a transport should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials
            | AuthError::Unauthorized
            | AuthError::InvalidRefreshToken => 401,
            AuthError::UserNotFound => 404,
            AuthError::Password(_) | AuthError::Token(_) | AuthError::Repository(_) => 500,
        }
    }
}
