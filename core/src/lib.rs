//! # AuthGate Core
//!
//! Core business logic and domain layer for the AuthGate backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the OTP step-up
//! authentication and JWT session subsystem.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    BlacklistEntry, Claims, OtpCode, OtpExchangeToken, OtpProcess, OtpProcessKind,
    OtpProcessStatus, RevokeReason, User, WhitelistEntry,
};
pub use domain::value_objects::AuthTokens;
pub use errors::{
    AuthError, DomainError, DomainResult, ErrorKind, OtpError, TokenError, ValidationError,
};
pub use repositories::{
    InMemoryOtpRepository, InMemorySessionRepository, InMemoryUserRepository, OtpRepository,
    SessionRepository, UserRepository,
};
pub use services::{
    AuthService, BcryptHasher, Clock, MailServiceTrait, ManualClock, OtpService,
    OtpServiceConfig, SecretHasher, SystemClock, TokenService, TokenServiceConfig,
};
