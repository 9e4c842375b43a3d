//! Tests for the in-memory session repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::session::{BlacklistEntry, RevokeReason, WhitelistEntry};
use crate::repositories::session::{InMemorySessionRepository, SessionRepository};

#[tokio::test]
async fn test_whitelist_lookup_by_pair_jti() {
    let repo = InMemorySessionRepository::new();
    let entry = WhitelistEntry::new(
        Uuid::new_v4(),
        "refresh-jti",
        "access-jti",
        Utc::now() + Duration::weeks(2),
    );
    repo.insert_whitelist(entry.clone()).await.unwrap();

    let found = repo.find_by_pair_jti("access-jti").await.unwrap().unwrap();
    assert_eq!(found.jti, "refresh-jti");
    assert!(repo.find_by_pair_jti("other").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_whitelist() {
    let repo = InMemorySessionRepository::new();
    let entry = WhitelistEntry::new(Uuid::new_v4(), "r", "a", Utc::now());
    repo.insert_whitelist(entry.clone()).await.unwrap();

    assert!(repo.delete_whitelist(entry.id).await.unwrap());
    assert!(!repo.delete_whitelist(entry.id).await.unwrap());
    assert!(repo.find_by_pair_jti("a").await.unwrap().is_none());
}

#[tokio::test]
async fn test_blacklist_records_reason() {
    let repo = InMemorySessionRepository::new();
    let entry = BlacklistEntry::new(
        Uuid::new_v4(),
        "stale-jti",
        Utc::now() + Duration::weeks(2),
        Utc::now(),
        RevokeReason::Refresh,
    );
    repo.insert_blacklist(entry).await.unwrap();

    let found = repo.find_blacklisted("stale-jti").await.unwrap().unwrap();
    assert_eq!(found.reason, RevokeReason::Refresh);
    assert!(repo.is_blacklisted("stale-jti").await.unwrap());
    assert!(!repo.is_blacklisted("fresh-jti").await.unwrap());
}
