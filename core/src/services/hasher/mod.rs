//! One-way secret hashing.
//!
//! Passwords, OTP codes and exchange tokens all go through the same
//! primitive; only hashes ever reach a store.

use crate::errors::{DomainError, DomainResult};

/// One-way hash and verify for short-lived and long-lived secrets
pub trait SecretHasher: Send + Sync {
    /// Hash a plaintext secret
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// Verify a plaintext against a stored digest
    fn verify(&self, plaintext: &str, digest: &str) -> DomainResult<bool>;
}

/// bcrypt-backed hasher
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with the default bcrypt cost
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost (tests use the minimum)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash secret: {}", e),
        })
    }

    fn verify(&self, plaintext: &str, digest: &str) -> DomainResult<bool> {
        bcrypt::verify(plaintext, digest).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify secret: {}", e),
        })
    }
}
