//! Domain-specific error types for authentication, OTP and token operations
//!
//! Error messages stay generic on purpose: authentication failures must not
//! leak which check failed. The presentation layer maps these to status
//! codes and localized strings.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Mail service failure")]
    MailServiceFailure,

    #[error("Session expired")]
    SessionExpired,
}

/// OTP lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// A code was already sent inside the resend window; wait and retry
    #[error("Verification code already sent")]
    AlreadySent,

    /// Absent, mismatched or expired code
    #[error("Invalid verification code")]
    InvalidCode,

    /// No verified process, or the process expired
    #[error("Invalid verification process")]
    InvalidProcess,

    /// Absent, mismatched, expired or already-consumed exchange token
    #[error("Invalid exchange token")]
    InvalidToken,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Invalid token TTL: {value}")]
    InvalidTtl { value: String },
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },
}
