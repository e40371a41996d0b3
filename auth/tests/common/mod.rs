use std::sync::Arc;

use token_auth::Argon2Hasher;
use token_auth::AuthConfig;
use token_auth::AuthenticationService;
use token_auth::FixedClock;
use token_auth::InMemoryStore;
use token_auth::PasswordHasher;
use token_auth::TokenIssuer;
use token_auth::TokenSettings;
use token_auth::User;

pub const SECRET: &str = "integration_secret_at_least_32_bytes!";
pub const NOW: i64 = 1_700_000_000;

pub type Service = AuthenticationService<InMemoryStore, InMemoryStore>;

/// Authentication service over an in-memory store
pub struct TestAuth {
    pub store: Arc<InMemoryStore>,
    pub service: Arc<Service>,
}

impl TestAuth {
    /// Service on the system clock, built from configuration
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let service = AuthenticationService::from_config(&config(), store.clone(), store.clone())
            .expect("Failed to build service");

        Self {
            store,
            service: Arc::new(service),
        }
    }

    /// Service frozen at a Unix timestamp
    pub fn at(now: i64) -> Self {
        Self::at_with_store(now, Arc::new(InMemoryStore::new()))
    }

    /// Service frozen at a Unix timestamp, sharing an existing store
    pub fn at_with_store(now: i64, store: Arc<InMemoryStore>) -> Self {
        let issuer = TokenIssuer::with_clock(&config(), Arc::new(FixedClock::at_timestamp(now)))
            .expect("Failed to build issuer");
        let service = AuthenticationService::new(
            issuer,
            Arc::new(Argon2Hasher::new()),
            store.clone(),
            store.clone(),
        );

        Self {
            store,
            service: Arc::new(service),
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> User {
        let digest = Argon2Hasher::new()
            .hash(password)
            .expect("Failed to hash password");

        self.store
            .insert_user(User::new(username, email, digest))
            .await
            .expect("Failed to insert user")
    }
}

pub fn config() -> AuthConfig {
    AuthConfig::new(SECRET, TokenSettings::default())
}
