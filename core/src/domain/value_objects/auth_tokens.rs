//! Token pair returned to the client after login or refresh.

use serde::{Deserialize, Serialize};

/// JWT access/refresh pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived JWT access token
    pub access_token: String,

    /// Long-lived JWT refresh token, usable for at most one rotation
    pub refresh_token: String,
}

impl AuthTokens {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
