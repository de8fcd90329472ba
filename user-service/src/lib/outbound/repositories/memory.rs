//! In-memory user repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store for development and testing.
///
/// Keyed by normalized username; the write lock makes check-and-insert
/// atomic, mirroring the unique constraint of the Postgres table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        let key = user.username.as_str().to_string();
        if users.contains_key(&key) {
            return Err(UserError::UsernameAlreadyExists(key));
        }

        users.insert(key, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(username.as_str()).cloned())
    }
}
