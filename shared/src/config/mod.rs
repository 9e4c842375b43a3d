//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and expiration configuration
//! - `mail` - SMTP transport configuration for OTP delivery

pub mod auth;
pub mod mail;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use mail::MailConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Mail transport configuration
    pub mail: MailConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            mail: MailConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            mail: MailConfig::default(),
        }
    }
}
