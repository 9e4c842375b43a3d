//! In-memory implementation of SessionRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session::{BlacklistEntry, WhitelistEntry};
use crate::errors::DomainError;

use super::r#trait::SessionRepository;

/// In-memory session repository
pub struct InMemorySessionRepository {
    whitelist: Arc<RwLock<HashMap<Uuid, WhitelistEntry>>>,
    blacklist: Arc<RwLock<HashMap<String, BlacklistEntry>>>,
}

impl InMemorySessionRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            whitelist: Arc::new(RwLock::new(HashMap::new())),
            blacklist: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of live whitelist rows
    pub async fn whitelist_count(&self) -> usize {
        self.whitelist.read().await.len()
    }

    /// Number of blacklist rows
    pub async fn blacklist_count(&self) -> usize {
        self.blacklist.read().await.len()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert_whitelist(
        &self,
        entry: WhitelistEntry,
    ) -> Result<WhitelistEntry, DomainError> {
        let mut whitelist = self.whitelist.write().await;
        whitelist.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn find_by_pair_jti(
        &self,
        access_jti: &str,
    ) -> Result<Option<WhitelistEntry>, DomainError> {
        let whitelist = self.whitelist.read().await;
        Ok(whitelist
            .values()
            .find(|e| e.pair_token_jti == access_jti && e.revoked_at.is_none())
            .cloned())
    }

    async fn delete_whitelist(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut whitelist = self.whitelist.write().await;
        Ok(whitelist.remove(&id).is_some())
    }

    async fn insert_blacklist(
        &self,
        entry: BlacklistEntry,
    ) -> Result<BlacklistEntry, DomainError> {
        let mut blacklist = self.blacklist.write().await;
        blacklist.insert(entry.jti.clone(), entry.clone());
        Ok(entry)
    }

    async fn find_blacklisted(&self, jti: &str) -> Result<Option<BlacklistEntry>, DomainError> {
        let blacklist = self.blacklist.read().await;
        Ok(blacklist.get(jti).cloned())
    }
}
