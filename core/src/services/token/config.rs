//! Configuration and TTL notation for the session token service.

use ag_shared::config::JwtConfig;
use chrono::Duration;

use crate::errors::TokenError;

/// Configuration for the session token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub jwt_secret: String,
    /// Access token lifetime in TTL notation (e.g. "1h")
    pub access_token_ttl: String,
    /// Refresh token lifetime in TTL notation (e.g. "2w")
    pub refresh_token_ttl: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev_secret_change_in_production".to_string(),
            access_token_ttl: "1h".to_string(),
            refresh_token_ttl: "2w".to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_ttl: config.expiration.clone(),
            refresh_token_ttl: config.refresh_expiration.clone(),
        }
    }
}

/// Parse TTL notation into a duration
///
/// Accepts a bare integer (seconds) or an integer with a unit suffix:
/// `s` seconds, `m` minutes, `h` hours, `d` days, `w` weeks. Suffixes are
/// case-insensitive.
pub fn parse_ttl(value: &str) -> Result<Duration, TokenError> {
    let invalid = || TokenError::InvalidTtl {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let seconds: i64 = trimmed.parse().map_err(|_| invalid())?;
        return Ok(Duration::seconds(seconds));
    }

    let (amount, unit) = trimmed.split_at(trimmed.len() - 1);
    let amount: i64 = amount.parse().map_err(|_| invalid())?;
    if amount <= 0 {
        return Err(invalid());
    }

    match unit.to_ascii_lowercase().as_str() {
        "s" => Ok(Duration::seconds(amount)),
        "m" => Ok(Duration::minutes(amount)),
        "h" => Ok(Duration::hours(amount)),
        "d" => Ok(Duration::days(amount)),
        "w" => Ok(Duration::weeks(amount)),
        _ => Err(invalid()),
    }
}
