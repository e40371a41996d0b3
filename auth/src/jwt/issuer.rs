use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use uuid::Uuid;

use super::claims::Claims;
use super::codec::JwtCodec;
use super::codec::TokenCodec;
use super::errors::JwtError;
use super::errors::Unauthorized;
use super::scope::TokenScope;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::AuthConfig;
use crate::config::SettingsError;
use crate::config::TokenSettings;

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token: String,
    pub expired_at: DateTime<Utc>,
    pub scope: TokenScope,
}

/// Issues scoped tokens and verifies them back.
///
/// Stamps `iat`, `exp`, `scope` and a random `jti` onto caller claims before
/// signing, so two tokens issued in the same second still differ.
pub struct TokenIssuer {
    codec: Arc<dyn TokenCodec>,
    settings: TokenSettings,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(codec: Arc<dyn TokenCodec>, settings: TokenSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec,
            settings,
            clock,
        }
    }

    /// Build an issuer signing with `JwtCodec` on the system clock.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Configured algorithm is not an HMAC algorithm
    /// * `InvalidSettings` - A configured lifetime is non-positive or out of range
    pub fn from_config(config: &AuthConfig) -> Result<Self, JwtError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a `JwtCodec`-backed issuer sharing the given clock.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Configured algorithm is not an HMAC algorithm
    /// * `InvalidSettings` - A configured lifetime is non-positive or out of range
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, JwtError> {
        config.token.validate()?;

        let codec = JwtCodec::new(
            config.secret.as_bytes(),
            &config.token.algorithm,
            Arc::clone(&clock),
        )?;

        Ok(Self::new(Arc::new(codec), config.token.clone(), clock))
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Sign claims for the given scope.
    ///
    /// # Arguments
    /// * `claims` - Subject claims; timing, scope and id fields are overwritten,
    ///   and reserved names are dropped from `extra`
    /// * `scope` - Token kind
    /// * `ttl` - Lifetime; `None` or non-positive uses the default lifetime
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or expiry is out of range
    /// * `InvalidSettings` - The default lifetime is needed but unusable
    pub fn issue(
        &self,
        claims: Claims,
        scope: TokenScope,
        ttl: Option<Duration>,
    ) -> Result<Token, JwtError> {
        self.issue_with_default(claims, scope, ttl, self.settings.default_ttl())
    }

    /// Issue an access token, defaulting to the access lifetime.
    pub fn issue_access(&self, claims: Claims, ttl: Option<Duration>) -> Result<Token, JwtError> {
        self.issue_with_default(
            claims,
            TokenScope::AccessToken,
            ttl,
            self.settings.access_ttl(),
        )
    }

    /// Issue a refresh token, defaulting to the refresh lifetime.
    pub fn issue_refresh(&self, claims: Claims, ttl: Option<Duration>) -> Result<Token, JwtError> {
        self.issue_with_default(
            claims,
            TokenScope::RefreshToken,
            ttl,
            self.settings.refresh_ttl(),
        )
    }

    fn issue_with_default(
        &self,
        claims: Claims,
        scope: TokenScope,
        ttl: Option<Duration>,
        default_ttl: Result<Duration, SettingsError>,
    ) -> Result<Token, JwtError> {
        let ttl = match ttl.filter(|ttl| *ttl > Duration::zero()) {
            Some(ttl) => ttl,
            None => default_ttl?,
        };

        let issued_at = self.clock.now().trunc_subsecs(0);
        let expired_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("Token lifetime out of range".to_string()))?;

        let claims = claims
            .without_reserved_extras()
            .with_issued_at(issued_at.timestamp())
            .with_expiration(expired_at.timestamp())
            .with_scope(scope)
            .with_token_id(Uuid::new_v4());

        let token = self.codec.encode(&claims)?;

        Ok(Token {
            token,
            expired_at,
            scope,
        })
    }

    /// Verify a token and require the expected scope.
    ///
    /// Every failure, whether signature, expiry, shape or scope, is reported
    /// as the same `Unauthorized`.
    pub fn verify(&self, token: &str, expected: TokenScope) -> Result<Claims, Unauthorized> {
        let claims = self.codec.decode(token).map_err(|e| {
            tracing::debug!(error = %e, scope = %expected, "Token failed to decode");
            Unauthorized
        })?;

        if claims.scope != Some(expected) {
            tracing::debug!(scope = %expected, "Token presented for the wrong scope");
            return Err(Unauthorized);
        }

        Ok(claims)
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, Unauthorized> {
        self.verify(token, TokenScope::AccessToken)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, Unauthorized> {
        self.verify(token, TokenScope::RefreshToken)
    }
}
