//! Repository interfaces for data persistence.
//!
//! The traits are storage-agnostic; the `InMemory*` implementations enforce
//! the same conditional-write semantics a production store must provide
//! (unique active code per user and kind, monotonic process transitions)
//! and back the test suites.

pub mod otp;
pub mod session;
pub mod user;

pub use otp::{InMemoryOtpRepository, OtpRepository};
pub use session::{InMemorySessionRepository, SessionRepository};
pub use user::{InMemoryUserRepository, UserRepository};
