//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, OtpError, TokenError, ValidationError};

use ag_shared::types::ErrorResponse;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure classification consumed by the boundary layer
///
/// Each public operation returns a typed failure that the transport maps to
/// a status code; no operation writes responses directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad credentials, missing/expired session, rejected token
    Unauthorized,
    /// Recoverable by waiting (e.g. OTP resend attempted inside the window)
    Conflict,
    /// Recoverable by retrying the challenge from scratch
    InvalidInput,
    /// Referenced resource does not exist
    NotFound,
    /// Store unavailable, signing key misconfigured, mail transport down
    Internal,
}

impl DomainError {
    /// Classify the error for the boundary layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Auth(AuthError::MailServiceFailure) => ErrorKind::Internal,
            DomainError::Auth(AuthError::UserNotFound) => ErrorKind::NotFound,
            DomainError::Auth(_) => ErrorKind::Unauthorized,
            DomainError::Otp(OtpError::AlreadySent) => ErrorKind::Conflict,
            DomainError::Otp(_) => ErrorKind::InvalidInput,
            DomainError::Token(TokenError::TokenGenerationFailed)
            | DomainError::Token(TokenError::InvalidTtl { .. }) => ErrorKind::Internal,
            DomainError::Token(_) => ErrorKind::Unauthorized,
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                ErrorKind::InvalidInput
            }
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(err) => match err {
                AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
                AuthError::UserNotFound => "USER_NOT_FOUND",
                AuthError::MailServiceFailure => "MAIL_SERVICE_FAILURE",
                AuthError::SessionExpired => "SESSION_EXPIRED",
            },
            DomainError::Otp(err) => match err {
                OtpError::AlreadySent => "OTP_ALREADY_SENT",
                OtpError::InvalidCode => "OTP_INVALID_CODE",
                OtpError::InvalidProcess => "OTP_INVALID_PROCESS",
                OtpError::InvalidToken => "OTP_INVALID_TOKEN",
            },
            DomainError::Token(err) => match err {
                TokenError::TokenExpired => "TOKEN_EXPIRED",
                TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
                TokenError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
                TokenError::TokenRevoked => "TOKEN_REVOKED",
                TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
                TokenError::InvalidTtl { .. } => "INVALID_TOKEN_TTL",
            },
            DomainError::ValidationErr(err) => match err {
                ValidationError::InvalidEmail => "INVALID_EMAIL",
                ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
                ValidationError::InvalidLength { .. } => "INVALID_LENGTH",
            },
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}
