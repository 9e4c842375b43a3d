//! Authentication orchestration module
//!
//! Composes the credential store, the OTP lifecycle service and the session
//! token service into the login, logout, refresh and password-reset flows.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
