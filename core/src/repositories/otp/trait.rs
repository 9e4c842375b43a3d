//! OTP repository trait defining persistence for codes, processes and
//! exchange tokens.
//!
//! # Ordering guarantees
//! Two invariants are enforced here rather than by the services, closing the
//! check-then-act window between concurrent request handlers:
//! - `save_code` is a conditional insert: at most one active code may exist
//!   per (user, process kind). A losing concurrent writer observes
//!   `OtpError::AlreadySent`.
//! - `set_process_status` is a conditional update: once a process is
//!   terminal, further transitions are no-ops reported as `Ok(false)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::otp::{
    OtpCode, OtpExchangeToken, OtpProcess, OtpProcessKind, OtpProcessStatus,
};
use crate::errors::DomainError;

/// Repository trait for OTP entity persistence operations
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a new code, failing if an active code already exists for the
    /// same (user, process kind)
    ///
    /// # Returns
    /// * `Ok(OtpCode)` - The persisted code
    /// * `Err(DomainError::Otp(OtpError::AlreadySent))` - Active code exists
    /// * `Err(DomainError)` - Store error occurred
    async fn save_code(&self, code: OtpCode) -> Result<OtpCode, DomainError>;

    /// Find the active (non-revoked) code for a user and process kind
    async fn find_active_code(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> Result<Option<OtpCode>, DomainError>;

    /// Revoke a code at the given instant
    ///
    /// Idempotent: revoking an already-revoked or missing code is a no-op.
    ///
    /// # Returns
    /// * `Ok(true)` - Code transitioned to revoked
    /// * `Ok(false)` - Code was already revoked or does not exist
    async fn revoke_code(&self, id: Uuid, revoked_at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Persist a new workflow process
    async fn save_process(&self, process: OtpProcess) -> Result<OtpProcess, DomainError>;

    /// Find the process owning a given code
    async fn find_process_by_code(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
        code_id: Uuid,
    ) -> Result<Option<OtpProcess>, DomainError>;

    /// Transition a process to a terminal status
    ///
    /// Monotonic: only `Pending` processes transition. Whichever mutation
    /// reaches the store first wins; the loser observes `Ok(false)`.
    ///
    /// # Returns
    /// * `Ok(true)` - Status updated
    /// * `Ok(false)` - Process already terminal or does not exist
    async fn set_process_status(
        &self,
        id: Uuid,
        status: OtpProcessStatus,
    ) -> Result<bool, DomainError>;

    /// Find the most recent verified process for a user and process kind,
    /// by expiration descending
    async fn find_latest_verified_process(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> Result<Option<OtpProcess>, DomainError>;

    /// Persist a new exchange token
    async fn save_token(
        &self,
        token: OtpExchangeToken,
    ) -> Result<OtpExchangeToken, DomainError>;

    /// Find the exchange token bound to a process, latest by expiration
    async fn find_token(
        &self,
        user_id: Uuid,
        process_id: Uuid,
    ) -> Result<Option<OtpExchangeToken>, DomainError>;

    /// Find any live exchange token for a user and process kind
    async fn find_active_token(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> Result<Option<OtpExchangeToken>, DomainError>;

    /// Hard-delete an exchange token (single redemption)
    ///
    /// # Returns
    /// * `Ok(true)` - Token deleted
    /// * `Ok(false)` - Token was already gone
    async fn delete_token(&self, id: Uuid) -> Result<bool, DomainError>;
}
