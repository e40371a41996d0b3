use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AuthConfig;
use crate::domain::errors::AuthError;
use crate::domain::models::Credentials;
use crate::domain::models::RefreshTokenRecord;
use crate::domain::models::TokenPair;
use crate::domain::models::User;
use crate::domain::ports::AuthServicePort;
use crate::domain::ports::TokenRepository;
use crate::domain::ports::UserRepository;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::Argon2Hasher;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Domain service implementation for authentication.
///
/// Coordinates password verification, token issuance and refresh rotation
/// over injected repositories. Holds no mutable state of its own.
pub struct AuthenticationService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    issuer: TokenIssuer,
    password_hasher: Arc<dyn PasswordHasher>,
    // Verified against when the user is unknown, so both paths pay for a hash
    dummy_digest: String,
}

impl<UR, TR> AuthenticationService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `issuer` - Token issuer bound to the signing secret
    /// * `password_hasher` - Password verification capability
    /// * `users` - User lookup implementation
    /// * `tokens` - Refresh token persistence implementation
    pub fn new(
        issuer: TokenIssuer,
        password_hasher: Arc<dyn PasswordHasher>,
        users: Arc<UR>,
        tokens: Arc<TR>,
    ) -> Self {
        let dummy_digest = password_hasher
            .hash("unknown-user-placeholder")
            .unwrap_or_default();

        Self {
            users,
            tokens,
            issuer,
            password_hasher,
            dummy_digest,
        }
    }

    /// Create a service signing JWTs per `config` and hashing with Argon2id.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Configured algorithm is not an HMAC algorithm
    /// * `InvalidSettings` - A configured lifetime is non-positive or out of range
    pub fn from_config(
        config: &AuthConfig,
        users: Arc<UR>,
        tokens: Arc<TR>,
    ) -> Result<Self, JwtError> {
        Ok(Self::new(
            TokenIssuer::from_config(config)?,
            Arc::new(Argon2Hasher::new()),
            users,
            tokens,
        ))
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Hash a password for storage at registration time.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Delete refresh records whose lifetime has passed.
    ///
    /// # Returns
    /// Number of records removed
    ///
    /// # Errors
    /// * `Repository` - Persistence failed
    pub async fn purge_expired(&self) -> Result<usize, AuthError> {
        let removed = self.tokens.delete_expired(self.issuer.now()).await?;
        self.tokens.commit().await?;

        tracing::debug!(removed, "Purged expired refresh tokens");

        Ok(removed)
    }

    async fn generate_tokens(&self, user: &User) -> Result<TokenPair, AuthError> {
        let claims = Claims::for_subject(&user.email);
        let access = self.issuer.issue_access(claims.clone(), None)?;
        let refresh = self.issuer.issue_refresh(claims, None)?;

        self.tokens
            .append(user, RefreshTokenRecord::new(&refresh, user.id))
            .await?;
        self.tokens.commit().await?;

        Ok(TokenPair::bearer(access, refresh))
    }

    /// Remove the record for a presented refresh token, if any.
    ///
    /// Returns the record only when this call was the one that removed it.
    async fn consume(&self, refresh_token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        let Some(record) = self.tokens.find_by_refresh(refresh_token).await? else {
            return Ok(None);
        };

        let removed = self.tokens.delete(&record).await?;
        self.tokens.commit().await.map_err(|e| {
            tracing::error!(user_id = %record.user_id, error = %e, "Failed to commit refresh token removal");
            e
        })?;

        Ok(removed.then_some(record))
    }
}

#[async_trait]
impl<UR, TR> AuthServicePort for AuthenticationService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_username_or_email(&credentials.username_or_email)
            .await?;

        let user = match user {
            Some(user) => self
                .password_hasher
                .verify(&credentials.password, &user.password_hash)
                .then_some(user),
            None => {
                self.password_hasher
                    .verify(&credentials.password, &self.dummy_digest);
                None
            }
        };

        let Some(user) = user else {
            tracing::warn!("Rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        };

        let pair = self.generate_tokens(&user).await?;
        tracing::debug!(user_id = %user.id, "User authenticated");

        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.issuer.verify_refresh(refresh_token)?;

        // Consumed before any other check, so a rejected token is still spent
        let record = self.consume(refresh_token).await?;

        let user = match claims.subject() {
            Some(subject) => self.users.find_by_username_or_email(subject).await?,
            None => None,
        };

        let now = self.issuer.now();
        let user = match (user, record) {
            (Some(user), Some(record))
                if record.user_id == user.id && !record.is_expired(now) =>
            {
                user
            }
            (_, record) => {
                tracing::warn!(
                    record_found = record.is_some(),
                    "Rejected refresh token"
                );
                return Err(AuthError::InvalidRefreshToken);
            }
        };

        let pair = self.generate_tokens(&user).await?;
        tracing::debug!(user_id = %user.id, "Refresh token rotated");

        Ok(pair)
    }

    async fn resolve(&self, access_token: &str) -> Result<User, AuthError> {
        let claims = self.issuer.verify_access(access_token)?;
        let subject = claims.subject().ok_or(AuthError::Unauthorized)?;

        self.users
            .find_by_username_or_email(subject)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn logout(&self, _token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}
