//! Traits for mail transport integration

use async_trait::async_trait;

use crate::domain::entities::otp::OtpProcessKind;

/// Trait for the mail transport delivering OTP codes
///
/// The transport receives the only copy of the plaintext code; the engine
/// persists a hash before calling this and treats acceptance by the
/// transport as delivery.
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send an OTP code to the given address
    ///
    /// Returns a transport message id on acceptance.
    async fn send_otp_email(
        &self,
        to: &str,
        process_kind: OtpProcessKind,
        code: &str,
    ) -> Result<String, String>;
}
