//! User entity backing the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A principal known to the credential store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, unique across the directory
    pub username: String,

    /// Email address used for OTP delivery
    pub email: String,

    /// Hashed password (never the plaintext)
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with an already-hashed password
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.created_at, user.updated_at);
    }
}
