use thiserror::Error;

use crate::config::SettingsError;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid token settings: {0}")]
    InvalidSettings(#[from] SettingsError),
}

/// Token verification failure.
///
/// Deliberately carries no detail: signature, expiry and scope failures are
/// indistinguishable to the caller.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Could not validate credentials")]
pub struct Unauthorized;
