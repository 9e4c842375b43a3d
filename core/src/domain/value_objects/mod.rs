//! Value objects shared across services.

pub mod auth_tokens;

pub use auth_tokens::AuthTokens;
