//! Behavioural tests for the session token service.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::session::RevokeReason;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemorySessionRepository, SessionRepository};
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{TokenService, TokenServiceConfig};

fn sample_user() -> User {
    User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        "$2b$04$unused".to_string(),
    )
}

fn service_with_clock(
    clock: Arc<ManualClock>,
) -> (TokenService<InMemorySessionRepository>, Arc<InMemorySessionRepository>) {
    let repo = Arc::new(InMemorySessionRepository::new());
    let service = TokenService::new(
        Arc::clone(&repo),
        clock as Arc<dyn Clock>,
        TokenServiceConfig::default(),
    )
    .unwrap();
    (service, repo)
}

fn service() -> (TokenService<InMemorySessionRepository>, Arc<InMemorySessionRepository>) {
    service_with_clock(Arc::new(ManualClock::starting_now()))
}

#[test]
fn test_new_rejects_bad_ttl_notation() {
    let repo = Arc::new(InMemorySessionRepository::new());
    let config = TokenServiceConfig {
        access_token_ttl: "soon".to_string(),
        ..TokenServiceConfig::default()
    };

    let result = TokenService::new(repo, Arc::new(ManualClock::starting_now()), config);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTtl { .. }))
    ));
}

#[tokio::test]
async fn test_issue_pair_whitelists_and_verifies() {
    let (service, repo) = service();
    let user = sample_user();

    let tokens = service.issue_pair(&user).await.unwrap();
    assert_ne!(tokens.access_token, tokens.refresh_token);
    assert_eq!(repo.whitelist_count().await, 1);

    let claims = service
        .verify_access_token(&tokens.access_token)
        .await
        .unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.user_id().unwrap(), user.id);

    // Whitelist row is keyed by the access jti of the pair
    let entry = repo.find_by_pair_jti(&claims.jti).await.unwrap().unwrap();
    assert_eq!(entry.user_id, user.id);
}

#[tokio::test]
async fn test_refresh_rotates_pair_and_blacklists_old_refresh() {
    let (service, repo) = service();
    let user = sample_user();

    let tokens = service.issue_pair(&user).await.unwrap();
    let old_access = service
        .verify_access_token(&tokens.access_token)
        .await
        .unwrap();
    let old_entry = repo
        .find_by_pair_jti(&old_access.jti)
        .await
        .unwrap()
        .unwrap();

    let rotated = service.refresh(&old_access.jti, &user).await.unwrap();
    assert_ne!(rotated.access_token, tokens.access_token);
    assert_ne!(rotated.refresh_token, tokens.refresh_token);

    // One live pair, old refresh jti blacklisted with the rotation reason
    assert_eq!(repo.whitelist_count().await, 1);
    let revoked = repo
        .find_blacklisted(&old_entry.jti)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(revoked.reason, RevokeReason::Refresh);

    // The consumed access jti cannot drive a second rotation
    let replay = service.refresh(&old_access.jti, &user).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_refresh_with_unknown_jti_fails() {
    let (service, _repo) = service();
    let user = sample_user();

    let result = service.refresh("no-such-jti", &user).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_revoke_cascades_to_paired_refresh_token() {
    let (service, repo) = service();
    let user = sample_user();

    let tokens = service.issue_pair(&user).await.unwrap();
    let claims = service
        .verify_access_token(&tokens.access_token)
        .await
        .unwrap();
    let entry = repo.find_by_pair_jti(&claims.jti).await.unwrap().unwrap();

    service.revoke(&claims).await.unwrap();

    assert_eq!(repo.whitelist_count().await, 0);
    assert_eq!(repo.blacklist_count().await, 2);

    let access_revoked = repo.find_blacklisted(&claims.jti).await.unwrap().unwrap();
    assert_eq!(access_revoked.reason, RevokeReason::Logout);
    let refresh_revoked = repo.find_blacklisted(&entry.jti).await.unwrap().unwrap();
    assert_eq!(refresh_revoked.reason, RevokeReason::Logout);

    // The revoked access token no longer verifies
    let result = service.verify_access_token(&tokens.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_verify_rejects_garbage_and_wrong_key() {
    let (service, _repo) = service();
    let user = sample_user();

    let result = service.verify_access_token("not-a-jwt").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));

    // Token signed under a different secret
    let other_repo = Arc::new(InMemorySessionRepository::new());
    let other = TokenService::new(
        other_repo,
        Arc::new(ManualClock::starting_now()) as Arc<dyn Clock>,
        TokenServiceConfig {
            jwt_secret: "a_different_secret".to_string(),
            ..TokenServiceConfig::default()
        },
    )
    .unwrap();
    let foreign = other.issue_pair(&user).await.unwrap();

    let result = service.verify_access_token(&foreign.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[tokio::test]
async fn test_verify_rejects_expired_access_token() {
    // Issue from a clock two hours in the past so the 1h access token is
    // already expired by wall-clock time
    let past = Arc::new(ManualClock::new(Utc::now() - Duration::hours(2)));
    let (service, _repo) = service_with_clock(past);
    let user = sample_user();

    let tokens = service.issue_pair(&user).await.unwrap();

    let result = service.verify_access_token(&tokens.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));

    // Rotation still accepts the expired access token
    let claims = service
        .decode_for_refresh(&tokens.access_token)
        .await
        .unwrap();
    let rotated = service.refresh(&claims.jti, &user).await.unwrap();
    assert_ne!(rotated.access_token, tokens.access_token);
}
