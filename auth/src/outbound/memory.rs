use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::errors::RepositoryError;
use crate::domain::models::RefreshTokenRecord;
use crate::domain::models::User;
use crate::domain::models::UserId;
use crate::domain::ports::TokenRepository;
use crate::domain::ports::UserRepository;

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    /// Map of refresh token string -> record
    tokens: HashMap<String, RefreshTokenRecord>,
}

/// Process-local user and refresh token storage.
///
/// Implements both repository ports. Every operation applies immediately
/// under a single lock, so `commit` has nothing left to do and concurrent
/// deletes of one record resolve to exactly one winner. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, enforcing unique username and email.
    ///
    /// # Errors
    /// * `Conflict` - Username or email already taken
    pub async fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;

        if let Some(existing) = state
            .users
            .values()
            .find(|u| u.username == user.username || u.email == user.email)
        {
            let field = if existing.username == user.username {
                "username"
            } else {
                "email"
            };
            return Err(RepositoryError::Conflict(format!("{} already exists", field)));
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Remove a user together with the refresh tokens it owns.
    ///
    /// # Returns
    /// Whether the user existed
    pub async fn remove_user(&self, id: &UserId) -> bool {
        let mut state = self.state.write().await;

        let removed = state.users.remove(id).is_some();
        state.tokens.retain(|_, record| record.user_id != *id);
        removed
    }

    /// Refresh token records currently owned by a user.
    pub async fn refresh_tokens_for(&self, id: &UserId) -> Vec<RefreshTokenRecord> {
        self.state
            .read()
            .await
            .tokens
            .values()
            .filter(|record| record.user_id == *id)
            .cloned()
            .collect()
    }

    pub async fn token_count(&self) -> usize {
        self.state.read().await.tokens.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn find_by_refresh(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, RepositoryError> {
        Ok(self.state.read().await.tokens.get(token).cloned())
    }

    async fn delete(&self, record: &RefreshTokenRecord) -> Result<bool, RepositoryError> {
        Ok(self
            .state
            .write()
            .await
            .tokens
            .remove(&record.token)
            .is_some())
    }

    async fn append(
        &self,
        user: &User,
        record: RefreshTokenRecord,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&user.id) {
            return Err(RepositoryError::DatabaseError(format!(
                "No user with id {}",
                user.id
            )));
        }

        let record = RefreshTokenRecord {
            user_id: user.id,
            ..record
        };
        state.tokens.insert(record.token.clone(), record);
        Ok(())
    }

    async fn commit(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut state = self.state.write().await;

        let before = state.tokens.len();
        state.tokens.retain(|_, record| !record.is_expired(now));
        Ok(before - state.tokens.len())
    }
}
