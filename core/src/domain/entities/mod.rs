//! Domain entities representing core business objects.

pub mod otp;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use otp::{
    OtpCode, OtpExchangeToken, OtpProcess, OtpProcessKind, OtpProcessStatus,
    CODE_EXPIRY_MINUTES, CODE_LENGTH, EXCHANGE_TOKEN_BYTES, EXCHANGE_TOKEN_EXPIRY_MINUTES,
    PROCESS_EXPIRY_MINUTES, RESEND_TIMEOUT_MINUTES,
};
pub use session::{BlacklistEntry, Claims, RevokeReason, WhitelistEntry, JWT_AUDIENCE, JWT_ISSUER};
pub use user::User;
