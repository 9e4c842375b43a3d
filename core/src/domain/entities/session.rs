//! Session entities for JWT-based authentication: signed claims plus the
//! whitelist/blacklist registries that track live and revoked token pairs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "authgate";

/// JWT audience
pub const JWT_AUDIENCE: &str = "authgate-api";

/// Claims structure for JWT payload
///
/// Both tokens of a pair carry the same shape; only `jti` and `exp` differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username of the principal
    pub username: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (revocation/rotation key)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a token expiring at `issued_at + ttl`
    pub fn new(
        user_id: Uuid,
        username: &str,
        jti: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiry = issued_at + ttl;

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            nbf: issued_at.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: jti.to_string(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Checks if the claims have expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Reason a jti was moved to the blacklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RevokeReason {
    /// Session ended explicitly by the principal
    Logout,
    /// Refresh token consumed by rotation
    Refresh,
}

/// A live refresh token and its paired access jti
///
/// A row exists from pair issuance until the refresh token is consumed by
/// rotation or logout, at which point it is deleted and a blacklist entry
/// records the revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    /// Unique identifier for the entry
    pub id: Uuid,

    /// User the session belongs to
    pub user_id: Uuid,

    /// jti of the refresh token
    pub jti: String,

    /// jti of the paired access token
    pub pair_token_jti: String,

    /// Expiry of the refresh token
    pub expires_at: DateTime<Utc>,

    /// Set when the entry is administratively revoked in place
    pub revoked_at: Option<DateTime<Utc>>,
}

impl WhitelistEntry {
    /// Creates a new whitelist entry for a freshly issued pair
    pub fn new(
        user_id: Uuid,
        refresh_jti: &str,
        access_jti: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            jti: refresh_jti.to_string(),
            pair_token_jti: access_jti.to_string(),
            expires_at,
            revoked_at: None,
        }
    }
}

/// A revoked jti, retained for auditing and reuse rejection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    /// Unique identifier for the entry
    pub id: Uuid,

    /// User the revoked token belonged to
    pub user_id: Uuid,

    /// The revoked jti
    pub jti: String,

    /// Original expiry of the revoked token
    pub expires_at: DateTime<Utc>,

    /// When the revocation happened
    pub revoked_at: DateTime<Utc>,

    /// What triggered the revocation
    pub reason: RevokeReason,
}

impl BlacklistEntry {
    /// Creates a new blacklist entry
    pub fn new(
        user_id: Uuid,
        jti: &str,
        expires_at: DateTime<Utc>,
        revoked_at: DateTime<Utc>,
        reason: RevokeReason,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            jti: jti.to_string(),
            expires_at,
            revoked_at,
            reason,
        }
    }
}
