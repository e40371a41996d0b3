use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::jwt::Token;

/// Registered user.
///
/// Refresh token records are owned by the user but stored by the
/// `TokenRepository`, keyed by `UserId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier.
    ///
    /// # Arguments
    /// * `username` - Unique username
    /// * `email` - Unique email address, also used as the token subject
    /// * `password_hash` - Digest produced by a `PasswordHasher`
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persisted refresh token, redeemable once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub expired_at: DateTime<Utc>,
    /// Owner, for lookup only
    pub user_id: UserId,
}

impl RefreshTokenRecord {
    pub fn new(token: &Token, user_id: UserId) -> Self {
        Self {
            token: token.token.clone(),
            expired_at: token.expired_at,
            user_id,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expired_at
    }
}

/// Login form: a username or email plus a password.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(alias = "username")]
    pub username_or_email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username_or_email: username_or_email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username_or_email", &self.username_or_email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// A token string and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub token: String,
    pub expired_at: DateTime<Utc>,
}

impl From<Token> for TokenData {
    fn from(token: Token) -> Self {
        Self {
            token: token.token,
            expired_at: token.expired_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Bearer,
}

/// Access and refresh tokens handed back after login or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access: TokenData,
    pub refresh: TokenData,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl TokenPair {
    pub fn bearer(access: Token, refresh: Token) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
            token_type: TokenType::Bearer,
        }
    }
}
