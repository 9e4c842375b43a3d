//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// Expiration values use calendar notation (`"1h"`, `"2w"`, `"30m"`, `"45s"`)
/// or a bare number of seconds; parsing happens in the token service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry (calendar notation or seconds)
    pub expiration: String,

    /// Refresh token expiry (calendar notation or seconds)
    pub refresh_expiration: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            expiration: String::from("1h"),
            refresh_expiration: String::from("2w"),
        }
    }
}

impl JwtConfig {
    /// Load the JWT configuration from environment variables
    ///
    /// Reads `JWT_SECRET`, `JWT_EXPIRATION` and `JWT_REFRESH_EXPIRATION`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiration: std::env::var("JWT_EXPIRATION").unwrap_or(defaults.expiration),
            refresh_expiration: std::env::var("JWT_REFRESH_EXPIRATION")
                .unwrap_or(defaults.refresh_expiration),
        }
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}
