//! Configuration for the OTP lifecycle service

use crate::domain::entities::otp::{
    CODE_EXPIRY_MINUTES, EXCHANGE_TOKEN_BYTES, EXCHANGE_TOKEN_EXPIRY_MINUTES,
    PROCESS_EXPIRY_MINUTES, RESEND_TIMEOUT_MINUTES,
};

/// Configuration for the OTP lifecycle service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes until an issued code expires
    pub code_expiry_minutes: i64,
    /// Minutes until the workflow process expires
    pub process_expiry_minutes: i64,
    /// Minutes until a minted exchange token expires
    pub token_expiry_minutes: i64,
    /// Minutes a caller must wait before a code can be re-sent
    pub resend_timeout_minutes: i64,
    /// Random bytes per exchange token (hex-encoded)
    pub token_bytes: usize,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiry_minutes: CODE_EXPIRY_MINUTES,
            process_expiry_minutes: PROCESS_EXPIRY_MINUTES,
            token_expiry_minutes: EXCHANGE_TOKEN_EXPIRY_MINUTES,
            resend_timeout_minutes: RESEND_TIMEOUT_MINUTES,
            token_bytes: EXCHANGE_TOKEN_BYTES,
        }
    }
}
