//! Session token module
//!
//! Issues signed JWT access/refresh pairs, rotates them on refresh, and
//! tracks liveness through the whitelist/blacklist registries.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::{parse_ttl, TokenServiceConfig};
pub use service::TokenService;
