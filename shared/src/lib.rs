//! Shared utilities and common types for AuthGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (email validation, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, JwtConfig, MailConfig};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::validation;
