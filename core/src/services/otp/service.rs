//! Main OTP lifecycle service implementation

use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::otp::{
    OtpCode, OtpExchangeToken, OtpProcess, OtpProcessKind, OtpProcessStatus, CODE_LENGTH,
};
use crate::errors::{AuthError, DomainError, DomainResult, OtpError};
use crate::repositories::{OtpRepository, UserRepository};
use crate::services::clock::Clock;
use crate::services::hasher::SecretHasher;

use super::config::OtpServiceConfig;
use super::traits::MailServiceTrait;

/// OTP lifecycle service owning code, process and exchange-token mutation
///
/// No other component writes these entities. All state lives in the backing
/// store; concurrent handlers are serialized by the store's conditional
/// writes, not by in-process locking.
pub struct OtpService<O, U, M>
where
    O: OtpRepository,
    U: UserRepository,
    M: MailServiceTrait,
{
    /// OTP store for codes, processes and exchange tokens
    otp_repository: Arc<O>,
    /// Credential store for resolving principals and their email
    user_repository: Arc<U>,
    /// Mail transport for code delivery
    mail_service: Arc<M>,
    /// Shared one-way hasher
    hasher: Arc<dyn SecretHasher>,
    /// Injected time source
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O, U, M> OtpService<O, U, M>
where
    O: OtpRepository,
    U: UserRepository,
    M: MailServiceTrait,
{
    /// Create a new OTP lifecycle service
    pub fn new(
        otp_repository: Arc<O>,
        user_repository: Arc<U>,
        mail_service: Arc<M>,
        hasher: Arc<dyn SecretHasher>,
        clock: Arc<dyn Clock>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            otp_repository,
            user_repository,
            mail_service,
            hasher,
            clock,
            config,
        }
    }

    /// Generate and mail a fresh code for a user and process kind
    ///
    /// An active code inside the resend window fails with `AlreadySent`.
    /// An active code outside the window is invalidated first: its process
    /// is finished, the code revoked, and any live exchange token for the
    /// same cycle removed, so a stale token cannot outlive its challenge.
    ///
    /// Returns only after the mail transport has accepted the message. A
    /// transport failure surfaces as an error with the created records left
    /// intact; they expire naturally and the next call supersedes them.
    pub async fn generate_code(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if let Some(existing) = self
            .otp_repository
            .find_active_code(user_id, process_kind)
            .await?
        {
            if self.is_before_resend_timeout(&existing) {
                tracing::warn!(
                    user_id = %user_id,
                    event = "otp_resend_throttled",
                    "Code requested inside the resend window"
                );
                return Err(DomainError::Otp(OtpError::AlreadySent));
            }
            self.invalidate_last_code(&existing).await?;
        }

        let otp = Self::generate_numeric_code();
        let code_hash = self.hasher.hash(&otp)?;
        let now = self.clock.now();

        // Conditional insert: a concurrent generator losing this race
        // observes AlreadySent from the store
        let code = self
            .otp_repository
            .save_code(OtpCode::new(
                user_id,
                process_kind,
                code_hash,
                now,
                self.clock.add_minutes(now, self.config.code_expiry_minutes),
            ))
            .await?;

        self.otp_repository
            .save_process(OtpProcess::new(
                user_id,
                process_kind,
                code.id,
                self.clock
                    .add_minutes(now, self.config.process_expiry_minutes),
            ))
            .await?;

        self.mail_service
            .send_otp_email(&user.email, process_kind, &otp)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user_id,
                    error = %e,
                    event = "otp_mail_failed",
                    "Mail transport rejected OTP delivery"
                );
                DomainError::Auth(AuthError::MailServiceFailure)
            })?;

        tracing::info!(
            user_id = %user_id,
            code_id = %code.id,
            event = "otp_generated",
            "Issued new verification code"
        );

        Ok(())
    }

    /// Generate a code for the principal owning an email address
    ///
    /// Unknown addresses succeed without side effects, so callers cannot
    /// distinguish "unknown email" from "code sent".
    pub async fn generate_code_by_email(
        &self,
        email: &str,
        process_kind: OtpProcessKind,
    ) -> DomainResult<()> {
        match self.user_repository.find_by_email(email).await? {
            Some(user) => self.generate_code(user.id, process_kind).await,
            None => Ok(()),
        }
    }

    /// Verify a plaintext code and mint a single-use exchange token
    ///
    /// On success the process becomes Verified, the code is revoked, and
    /// the plaintext token is returned to the caller exactly once.
    pub async fn verify_code(
        &self,
        user_id: Uuid,
        code: &str,
        process_kind: OtpProcessKind,
    ) -> DomainResult<String> {
        let existing = self
            .otp_repository
            .find_active_code(user_id, process_kind)
            .await?
            .ok_or(DomainError::Otp(OtpError::InvalidCode))?;

        let now = self.clock.now();
        if existing.is_expired(now) {
            return Err(DomainError::Otp(OtpError::InvalidCode));
        }
        if !self.hasher.verify(code, &existing.code_hash)? {
            tracing::warn!(
                user_id = %user_id,
                event = "otp_verification_failed",
                "Verification code mismatch"
            );
            return Err(DomainError::Otp(OtpError::InvalidCode));
        }

        let process = self
            .otp_repository
            .find_process_by_code(user_id, process_kind, existing.id)
            .await?
            .ok_or(DomainError::Otp(OtpError::InvalidCode))?;

        // A concurrent invalidation may have finished the process between
        // our read and this write; the loser treats the challenge as gone
        let transitioned = self
            .otp_repository
            .set_process_status(process.id, OtpProcessStatus::Verified)
            .await?;
        if !transitioned {
            return Err(DomainError::Otp(OtpError::InvalidCode));
        }

        self.otp_repository.revoke_code(existing.id, now).await?;

        let token = Self::generate_exchange_token(self.config.token_bytes);
        let token_hash = self.hasher.hash(&token)?;
        self.otp_repository
            .save_token(OtpExchangeToken::new(
                user_id,
                process_kind,
                process.id,
                token_hash,
                self.clock.add_minutes(now, self.config.token_expiry_minutes),
            ))
            .await?;

        tracing::info!(
            user_id = %user_id,
            process_id = %process.id,
            event = "otp_verified",
            "Verification code accepted, exchange token minted"
        );

        Ok(token)
    }

    /// Verify a code for the principal owning an email address
    pub async fn verify_code_by_email(
        &self,
        email: &str,
        code: &str,
        process_kind: OtpProcessKind,
    ) -> DomainResult<String> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;
        self.verify_code(user.id, code, process_kind).await
    }

    /// Gate for downstream privileged flows: the most recent verified,
    /// unexpired process for a user and process kind
    ///
    /// Tie-break between verified processes is latest expiration.
    pub async fn status_active_process(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> DomainResult<Uuid> {
        let process = self
            .otp_repository
            .find_latest_verified_process(user_id, process_kind)
            .await?
            .ok_or(DomainError::Otp(OtpError::InvalidProcess))?;

        if !self.clock.is_before(self.clock.now(), process.expires_at) {
            return Err(DomainError::Otp(OtpError::InvalidProcess));
        }

        Ok(process.id)
    }

    /// Redeem an exchange token; valid at most once
    ///
    /// The token is hard-deleted on success, so an immediate replay with
    /// the same plaintext fails.
    pub async fn verify_exchange_token(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
        process_id: Uuid,
        token: &str,
    ) -> DomainResult<()> {
        let stored = self
            .otp_repository
            .find_token(user_id, process_id)
            .await?
            .ok_or(DomainError::Otp(OtpError::InvalidToken))?;

        if stored.is_expired(self.clock.now()) {
            return Err(DomainError::Otp(OtpError::InvalidToken));
        }
        if !self.hasher.verify(token, &stored.token_hash)? {
            return Err(DomainError::Otp(OtpError::InvalidToken));
        }

        self.otp_repository.delete_token(stored.id).await?;

        tracing::info!(
            user_id = %user_id,
            process_id = %process_id,
            process_kind = ?process_kind,
            event = "otp_token_redeemed",
            "Exchange token redeemed and destroyed"
        );

        Ok(())
    }

    /// Retire a superseded cycle: finish its process, revoke its code and
    /// drop any exchange token it minted
    ///
    /// Every step is idempotent; a concurrent verification winning the
    /// process transition turns the finish into a no-op.
    async fn invalidate_last_code(&self, code: &OtpCode) -> DomainResult<()> {
        if let Some(process) = self
            .otp_repository
            .find_process_by_code(code.user_id, code.process_kind, code.id)
            .await?
        {
            let _ = self
                .otp_repository
                .set_process_status(process.id, OtpProcessStatus::Finished)
                .await?;
        }

        self.otp_repository
            .revoke_code(code.id, self.clock.now())
            .await?;

        if let Some(token) = self
            .otp_repository
            .find_active_token(code.user_id, code.process_kind)
            .await?
        {
            self.otp_repository.delete_token(token.id).await?;
        }

        tracing::info!(
            user_id = %code.user_id,
            code_id = %code.id,
            event = "otp_invalidated",
            "Superseded previous verification cycle"
        );

        Ok(())
    }

    /// Whether the code is still inside its resend window
    fn is_before_resend_timeout(&self, code: &OtpCode) -> bool {
        let timeout_end = self
            .clock
            .add_minutes(code.created_at, self.config.resend_timeout_minutes);
        self.clock.is_before(self.clock.now(), timeout_end)
    }

    /// Generate a uniformly random zero-padded numeric code using the OS
    /// CSPRNG
    fn generate_numeric_code() -> String {
        let num: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", num, width = CODE_LENGTH)
    }

    /// Generate a random opaque exchange token, hex-encoded
    fn generate_exchange_token(size: usize) -> String {
        let mut rng = OsRng;
        let mut bytes = vec![0u8; size];
        rng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}
