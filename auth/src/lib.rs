//! Token-based authentication and session library
//!
//! Verifies user credentials, issues signed bearer tokens and rotates
//! refresh tokens:
//! - Password hashing (Argon2id, behind the `PasswordHasher` trait)
//! - Scoped JWT issuance and verification (access vs refresh)
//! - Single-use refresh token rotation over repository ports
//!
//! Persistence is supplied by the embedding service through
//! `UserRepository` and `TokenRepository`; `InMemoryStore` implements both.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use token_auth::{Argon2Hasher, PasswordHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! assert!(!hasher.verify("other", &digest));
//! ```
//!
//! ## Scoped Tokens
//! ```
//! use token_auth::{AuthConfig, Claims, TokenIssuer, TokenSettings};
//!
//! let config = AuthConfig::new("secret_key_at_least_32_bytes_long!", TokenSettings::default());
//! let issuer = TokenIssuer::from_config(&config).unwrap();
//!
//! let access = issuer.issue_access(Claims::for_subject("a@x.com"), None).unwrap();
//! assert!(issuer.verify_access(&access.token).is_ok());
//! assert!(issuer.verify_refresh(&access.token).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use token_auth::{AuthConfig, AuthServicePort, AuthenticationService, Credentials};
//! use token_auth::{InMemoryStore, TokenSettings, User};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = Arc::new(InMemoryStore::new());
//! let config = AuthConfig::new("secret_key_at_least_32_bytes_long!", TokenSettings::default());
//! let auth = AuthenticationService::from_config(&config, store.clone(), store.clone()).unwrap();
//!
//! // Register
//! let digest = auth.hash_password("password123").unwrap();
//! store.insert_user(User::new("alice", "a@x.com", digest)).await.unwrap();
//!
//! // Login, then resolve the bearer token
//! let pair = auth.authenticate(&Credentials::new("alice", "password123")).await.unwrap();
//! let user = auth.resolve(&pair.access.token).await.unwrap();
//! assert_eq!(user.email, "a@x.com");
//!
//! // Rotate the refresh token
//! let rotated = auth.refresh(&pair.refresh.token).await.unwrap();
//! assert_ne!(rotated.refresh.token, pair.refresh.token);
//! assert!(auth.refresh(&pair.refresh.token).await.is_err());
//! # });
//! ```

pub mod bearer;
pub mod clock;
pub mod config;
pub mod domain;
pub mod jwt;
pub mod outbound;
pub mod password;

// Re-export commonly used items
pub use bearer::extract_bearer;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use config::AuthConfig;
pub use config::SettingsError;
pub use config::TokenSettings;
pub use domain::errors::AuthError;
pub use domain::errors::RepositoryError;
pub use domain::models::Credentials;
pub use domain::models::RefreshTokenRecord;
pub use domain::models::TokenData;
pub use domain::models::TokenPair;
pub use domain::models::TokenType;
pub use domain::models::User;
pub use domain::models::UserId;
pub use domain::ports::AuthServicePort;
pub use domain::ports::TokenRepository;
pub use domain::ports::UserRepository;
pub use domain::service::AuthenticationService;
pub use jwt::Claims;
pub use jwt::JwtCodec;
pub use jwt::JwtError;
pub use jwt::Token;
pub use jwt::TokenCodec;
pub use jwt::TokenIssuer;
pub use jwt::TokenScope;
pub use jwt::Unauthorized;
pub use outbound::InMemoryStore;
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
