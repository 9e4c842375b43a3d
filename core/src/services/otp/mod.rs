//! OTP lifecycle module
//!
//! This module owns the code/process/exchange-token state machine:
//! - code generation with resend throttling and supersession
//! - code verification minting a single-use exchange token
//! - process status queries for downstream privileged flows
//! - single-redemption exchange token checks

mod config;
mod service;
mod traits;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::MailServiceTrait;
