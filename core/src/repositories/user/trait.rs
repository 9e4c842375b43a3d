//! User repository trait defining the interface for the credential store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for principal lookup and password updates
///
/// Implementations handle the actual directory access while maintaining the
/// abstraction boundary between domain and infrastructure layers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their login name
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that username
    /// * `Err(DomainError)` - Directory error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Replace a user's password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - User not found
    /// * `Err(DomainError)` - Update failed
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError>;
}
