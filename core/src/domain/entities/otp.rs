//! OTP lifecycle entities: issued codes, workflow processes and single-use
//! exchange tokens.
//!
//! The three entities are deliberately separate so that proof of mailbox
//! possession (`OtpCode`), workflow state (`OtpProcess`) and the one-shot
//! capability handed to a privileged follow-up call (`OtpExchangeToken`)
//! expire independently of each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the numeric OTP code
pub const CODE_LENGTH: usize = 6;

/// Minutes until an issued code expires
pub const CODE_EXPIRY_MINUTES: i64 = 3;

/// Minutes until the workflow process expires
pub const PROCESS_EXPIRY_MINUTES: i64 = 5;

/// Minutes until a minted exchange token expires
pub const EXCHANGE_TOKEN_EXPIRY_MINUTES: i64 = 10;

/// Minutes a caller must wait before a code can be re-sent
pub const RESEND_TIMEOUT_MINUTES: i64 = 1;

/// Number of random bytes in an exchange token (hex-encoded on the wire)
pub const EXCHANGE_TOKEN_BYTES: usize = 16;

/// Purpose of an OTP challenge-response cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpProcessKind {
    /// Step-up challenge gating a password reset
    ChangePassword,
}

/// Status of an OTP workflow process
///
/// Transitions are monotonic: `Pending` moves to exactly one of the two
/// terminal states and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpProcessStatus {
    /// Challenge issued, awaiting verification
    Pending,
    /// Code checked successfully; the cycle may be consumed downstream
    Verified,
    /// Superseded by a newer generation cycle before verification
    Finished,
}

impl OtpProcessStatus {
    /// Whether this status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Finished)
    }
}

/// One issued 6-digit code
///
/// Revoked codes are retained for auditing; a code is *active* while
/// `revoked_at` is `None`. At most one active code exists per
/// (user, process kind) pair, enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier for the code
    pub id: Uuid,

    /// User this code was issued to
    pub user_id: Uuid,

    /// Hash of the plaintext code (the plaintext is only ever mailed)
    pub code_hash: String,

    /// Purpose of the challenge
    pub process_kind: OtpProcessKind,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code was revoked, if it has been
    pub revoked_at: Option<DateTime<Utc>>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    /// Creates a new pending code
    pub fn new(
        user_id: Uuid,
        process_kind: OtpProcessKind,
        code_hash: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            code_hash,
            process_kind,
            created_at,
            revoked_at: None,
            expires_at,
        }
    }

    /// Whether the code is still active (not revoked)
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }

    /// Whether the code has expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Workflow instance tracking one challenge-response cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpProcess {
    /// Unique identifier for the process
    pub id: Uuid,

    /// User the cycle belongs to
    pub user_id: Uuid,

    /// Purpose of the cycle
    pub process_kind: OtpProcessKind,

    /// Current workflow status
    pub status: OtpProcessStatus,

    /// The owning code, bound 1:1
    pub code_id: Uuid,

    /// Timestamp when the process expires
    pub expires_at: DateTime<Utc>,
}

impl OtpProcess {
    /// Creates a new pending process bound to a code
    pub fn new(
        user_id: Uuid,
        process_kind: OtpProcessKind,
        code_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            process_kind,
            status: OtpProcessStatus::Pending,
            code_id,
            expires_at,
        }
    }

    /// Whether the process has expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Single-use exchange token minted after a successful verification
///
/// Proves "the OTP challenge for this process was satisfied" to a subsequent
/// privileged call. Hard-deleted on first redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpExchangeToken {
    /// Unique identifier for the token
    pub id: Uuid,

    /// User the token was minted for
    pub user_id: Uuid,

    /// Purpose of the originating cycle
    pub process_kind: OtpProcessKind,

    /// The verified process this token is bound to
    pub process_id: Uuid,

    /// Hash of the plaintext token (plaintext is returned to the caller once)
    pub token_hash: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl OtpExchangeToken {
    /// Creates a new exchange token
    pub fn new(
        user_id: Uuid,
        process_kind: OtpProcessKind,
        process_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            process_kind,
            process_id,
            token_hash,
            expires_at,
        }
    }

    /// Whether the token has expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
