//! Behavioural tests for the authentication orchestration service.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::otp::OtpProcessKind;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, OtpError, TokenError, ValidationError};
use crate::repositories::{
    InMemoryOtpRepository, InMemorySessionRepository, InMemoryUserRepository,
};
use crate::services::auth::AuthService;
use crate::services::clock::{Clock, ManualClock};
use crate::services::hasher::{BcryptHasher, SecretHasher};
use crate::services::otp::{MailServiceTrait, OtpService, OtpServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Mail transport double capturing the delivered plaintext codes
struct CapturingMail {
    codes: Mutex<Vec<String>>,
}

impl CapturingMail {
    fn new() -> Self {
        Self {
            codes: Mutex::new(Vec::new()),
        }
    }

    async fn last_code(&self) -> String {
        self.codes.lock().await.last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl MailServiceTrait for CapturingMail {
    async fn send_otp_email(
        &self,
        _to: &str,
        _process_kind: OtpProcessKind,
        code: &str,
    ) -> Result<String, String> {
        self.codes.lock().await.push(code.to_string());
        Ok("msg-1".to_string())
    }
}

type TestAuthService =
    AuthService<InMemoryUserRepository, InMemoryOtpRepository, CapturingMail, InMemorySessionRepository>;

type TestOtpService = OtpService<InMemoryOtpRepository, InMemoryUserRepository, CapturingMail>;

struct Harness {
    auth: TestAuthService,
    otp_service: Arc<TestOtpService>,
    mail: Arc<CapturingMail>,
    clock: Arc<ManualClock>,
    user: User,
}

async fn harness() -> Harness {
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let otp_repo = Arc::new(InMemoryOtpRepository::new());
    let session_repo = Arc::new(InMemorySessionRepository::new());
    let mail = Arc::new(CapturingMail::new());
    let clock = Arc::new(ManualClock::starting_now());
    let hasher: Arc<dyn SecretHasher> = Arc::new(BcryptHasher::with_cost(4));

    let user = User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        hasher.hash("hunter2").unwrap(),
    );
    user_repo.insert(user.clone()).await;

    let otp_service = Arc::new(OtpService::new(
        otp_repo,
        Arc::clone(&user_repo),
        Arc::clone(&mail),
        Arc::clone(&hasher),
        clock.clone() as Arc<dyn Clock>,
        OtpServiceConfig::default(),
    ));
    let token_service = Arc::new(
        TokenService::new(
            session_repo,
            clock.clone() as Arc<dyn Clock>,
            TokenServiceConfig::default(),
        )
        .unwrap(),
    );

    let auth = AuthService::new(
        user_repo,
        Arc::clone(&otp_service),
        token_service,
        hasher,
    );

    Harness {
        auth,
        otp_service,
        mail,
        clock,
        user,
    }
}

impl Harness {
    /// Run the OTP challenge to completion and return the exchange token
    async fn complete_challenge(&self) -> String {
        self.otp_service
            .generate_code(self.user.id, OtpProcessKind::ChangePassword)
            .await
            .unwrap();
        let code = self.mail.last_code().await;
        self.otp_service
            .verify_code(self.user.id, &code, OtpProcessKind::ChangePassword)
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_login_issues_verifiable_pair() {
    let h = harness().await;

    let tokens = h.auth.login("alice", "hunter2").await.unwrap();
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = harness().await;

    let unknown_user = h.auth.login("mallory", "hunter2").await;
    let wrong_password = h.auth.login("alice", "wrong").await;

    for result in [unknown_user, wrong_password] {
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }
}

#[tokio::test]
async fn test_logout_revokes_access_token() {
    let h = harness().await;

    let tokens = h.auth.login("alice", "hunter2").await.unwrap();
    h.auth.logout(&tokens.access_token).await.unwrap();

    // Revoked token cannot log out twice or refresh
    let again = h.auth.logout(&tokens.access_token).await;
    assert!(matches!(
        again,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
    let refresh = h.auth.refresh_auth(&tokens.access_token).await;
    assert!(matches!(
        refresh,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_refresh_rotates_and_invalidates_old_pair() {
    let h = harness().await;

    let tokens = h.auth.login("alice", "hunter2").await.unwrap();
    let rotated = h.auth.refresh_auth(&tokens.access_token).await.unwrap();
    assert_ne!(rotated.access_token, tokens.access_token);

    // Old access token's whitelist row is gone
    let replay = h.auth.refresh_auth(&tokens.access_token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));

    // The fresh pair keeps working
    h.auth.logout(&rotated.access_token).await.unwrap();
}

#[tokio::test]
async fn test_reset_password_full_flow() {
    let h = harness().await;
    let token = h.complete_challenge().await;

    h.auth
        .reset_password("alice@example.com", &token, "correct horse")
        .await
        .unwrap();

    // Old password is out, new one is in
    let old = h.auth.login("alice", "hunter2").await;
    assert!(matches!(
        old,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    h.auth.login("alice", "correct horse").await.unwrap();

    // The exchange token was consumed; replaying it fails
    let replay = h
        .auth
        .reset_password("alice@example.com", &token, "third password")
        .await;
    assert!(matches!(
        replay,
        Err(DomainError::Otp(OtpError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_reset_password_requires_verified_process() {
    let h = harness().await;

    let result = h
        .auth
        .reset_password("alice@example.com", "deadbeef", "newpass")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::InvalidProcess))
    ));
}

#[tokio::test]
async fn test_reset_password_rejects_expired_process() {
    let h = harness().await;
    let token = h.complete_challenge().await;

    h.clock.advance_minutes(5);
    let result = h
        .auth
        .reset_password("alice@example.com", &token, "newpass")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::InvalidProcess))
    ));
}

#[tokio::test]
async fn test_reset_password_validates_email_and_identity() {
    let h = harness().await;

    let malformed = h
        .auth
        .reset_password("not-an-email", "token", "newpass")
        .await;
    assert!(matches!(
        malformed,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    let unknown = h
        .auth
        .reset_password("mallory@example.com", "token", "newpass")
        .await;
    assert!(matches!(
        unknown,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_profile_lookup() {
    let h = harness().await;

    let profile = h.auth.profile("alice").await.unwrap();
    assert_eq!(profile.id, h.user.id);
    assert_eq!(profile.email, "alice@example.com");

    let missing = h.auth.profile("mallory").await;
    assert!(matches!(
        missing,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
