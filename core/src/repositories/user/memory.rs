//! In-memory implementation of UserRepository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// In-memory user repository
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a user directly, for seeding test fixtures
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
