use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::AuthError;
use crate::domain::errors::RepositoryError;
use crate::domain::models::Credentials;
use crate::domain::models::RefreshTokenRecord;
use crate::domain::models::TokenPair;
use crate::domain::models::User;

/// Port for authentication operations consumed by a transport layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Repository` - Persistence failed
    async fn authenticate(&self, credentials: &Credentials) -> Result<TokenPair, AuthError>;

    /// Redeem a refresh token for a new pair. The presented token is consumed.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, or not a refresh token
    /// * `InvalidRefreshToken` - Token already redeemed, or its owner is gone
    /// * `Repository` - Persistence failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Resolve a bearer access token to its user.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, not an access token, or without subject
    /// * `UserNotFound` - Token valid but the user no longer exists
    /// * `Repository` - Persistence failed
    async fn resolve(&self, access_token: &str) -> Result<User, AuthError>;

    /// End a session. Always succeeds.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;
}

/// Lookup of users for authentication.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user whose username or email equals the identifier.
    ///
    /// Case handling is up to the implementation.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, RepositoryError>;
}

/// Persistence of refresh token records.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Retrieve the record for an exact refresh token string.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_refresh(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, RepositoryError>;

    /// Remove a record.
    ///
    /// Must be atomic: when several callers delete the same record
    /// concurrently, exactly one observes `true`.
    ///
    /// # Returns
    /// Whether this call removed the record
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, record: &RefreshTokenRecord) -> Result<bool, RepositoryError>;

    /// Attach a new record to its owning user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn append(&self, user: &User, record: RefreshTokenRecord)
        -> Result<(), RepositoryError>;

    /// Make pending changes durable.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn commit(&self) -> Result<(), RepositoryError>;

    /// Remove every record that expired at or before `now`.
    ///
    /// # Returns
    /// Number of records removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError>;
}
