//! Session repository trait defining persistence for the token pair
//! whitelist and blacklist registries.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::session::{BlacklistEntry, WhitelistEntry};
use crate::errors::DomainError;

/// Repository trait for whitelist/blacklist persistence operations
///
/// A refresh jti lives in the whitelist from issuance until it is consumed
/// by rotation or logout; consumption deletes the row and records a
/// blacklist entry carrying the triggering reason.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Record a live refresh token and its paired access jti
    async fn insert_whitelist(
        &self,
        entry: WhitelistEntry,
    ) -> Result<WhitelistEntry, DomainError>;

    /// Find the whitelist row whose paired access jti matches
    async fn find_by_pair_jti(
        &self,
        access_jti: &str,
    ) -> Result<Option<WhitelistEntry>, DomainError>;

    /// Delete a whitelist row
    ///
    /// # Returns
    /// * `Ok(true)` - Row deleted
    /// * `Ok(false)` - Row was already gone
    async fn delete_whitelist(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Record a revoked jti
    async fn insert_blacklist(
        &self,
        entry: BlacklistEntry,
    ) -> Result<BlacklistEntry, DomainError>;

    /// Look up a revoked jti
    async fn find_blacklisted(&self, jti: &str) -> Result<Option<BlacklistEntry>, DomainError>;

    /// Check whether a jti has been revoked
    async fn is_blacklisted(&self, jti: &str) -> Result<bool, DomainError> {
        Ok(self.find_blacklisted(jti).await?.is_some())
    }
}
