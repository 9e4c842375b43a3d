//! Mail transport configuration for OTP delivery

use serde::{Deserialize, Serialize};

/// SMTP transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// SMTP username
    pub user: String,

    /// SMTP password
    pub password: String,

    /// Sender address used on outgoing OTP mail
    pub sender: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            user: String::new(),
            password: String::new(),
            sender: String::new(),
        }
    }
}

impl MailConfig {
    /// Load the mail configuration from `MAIL_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("MAIL_HOST").unwrap_or(defaults.host),
            port: std::env::var("MAIL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            user: std::env::var("MAIL_USER").unwrap_or(defaults.user),
            password: std::env::var("MAIL_PASS").unwrap_or(defaults.password),
            sender: std::env::var("MAIL_SENDER").unwrap_or(defaults.sender),
        }
    }

    /// Check whether the transport is configured at all
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.sender.is_empty()
    }
}
