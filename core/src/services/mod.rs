//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod hasher;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use clock::{Clock, ManualClock, SystemClock};
pub use hasher::{BcryptHasher, SecretHasher};
pub use otp::{MailServiceTrait, OtpService, OtpServiceConfig};
pub use token::{TokenService, TokenServiceConfig};
