//! Main authentication orchestration service

use std::sync::Arc;

use crate::domain::entities::otp::OtpProcessKind;
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthTokens;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{OtpRepository, SessionRepository, UserRepository};
use crate::services::hasher::SecretHasher;
use crate::services::otp::{MailServiceTrait, OtpService};
use crate::services::token::TokenService;

/// Orchestrates the authentication flows over the underlying engines
///
/// Owns no token or OTP state itself; it resolves principals, checks
/// passwords and sequences calls into the two engines.
pub struct AuthService<U, O, M, S>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailServiceTrait,
    S: SessionRepository,
{
    /// Credential store
    user_repository: Arc<U>,
    /// OTP lifecycle engine
    otp_service: Arc<OtpService<O, U, M>>,
    /// Session token engine
    token_service: Arc<TokenService<S>>,
    /// Password hasher
    hasher: Arc<dyn SecretHasher>,
}

impl<U, O, M, S> AuthService<U, O, M, S>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailServiceTrait,
    S: SessionRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        otp_service: Arc<OtpService<O, U, M>>,
        token_service: Arc<TokenService<S>>,
        hasher: Arc<dyn SecretHasher>,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            token_service,
            hasher,
        }
    }

    /// Authenticate with username and password, issuing a token pair
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller; both fail with the same credentials error.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthTokens> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::warn!(
                user_id = %user.id,
                event = "login_rejected",
                "Password verification failed"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        let tokens = self.token_service.issue_pair(&user).await?;

        tracing::info!(
            user_id = %user.id,
            event = "login_succeeded",
            "User authenticated"
        );

        Ok(tokens)
    }

    /// End the session behind a live access token
    ///
    /// The token must still verify; revocation then blacklists it and
    /// cascades to its paired refresh token.
    pub async fn logout(&self, access_token: &str) -> DomainResult<()> {
        let claims = self.token_service.verify_access_token(access_token).await?;
        self.token_service.revoke(&claims).await
    }

    /// Rotate the token pair behind a possibly expired access token
    ///
    /// The access token may be past its expiry, but its signature must
    /// verify and its jti must still anchor a live whitelist row.
    pub async fn refresh_auth(&self, access_token: &str) -> DomainResult<AuthTokens> {
        let claims = self.token_service.decode_for_refresh(access_token).await?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Auth(AuthError::InvalidCredentials))?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        self.token_service.refresh(&claims.jti, &user).await
    }

    /// Reset a password after an OTP challenge has been satisfied
    ///
    /// Requires a verified, unexpired change-password process for the user
    /// and a valid exchange token bound to it; the token is consumed here,
    /// so a second reset needs a fresh challenge.
    pub async fn reset_password(
        &self,
        email: &str,
        otp_token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if !ag_shared::validation::is_valid_email(email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        let process_id = self
            .otp_service
            .status_active_process(user.id, OtpProcessKind::ChangePassword)
            .await?;
        self.otp_service
            .verify_exchange_token(
                user.id,
                OtpProcessKind::ChangePassword,
                process_id,
                otp_token,
            )
            .await?;

        let password_hash = self.hasher.hash(new_password)?;
        self.user_repository
            .update_password(user.id, &password_hash)
            .await?;

        tracing::info!(
            user_id = %user.id,
            event = "password_reset",
            "Password updated after OTP challenge"
        );

        Ok(())
    }

    /// Look up a principal's profile by username
    pub async fn profile(&self, username: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }
}
