//! In-memory implementation of OtpRepository.
//!
//! The conditional writes (`save_code`, `set_process_status`) run under a
//! single write lock, giving the same atomicity a database uniqueness
//! constraint or conditional update would provide.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp::{
    OtpCode, OtpExchangeToken, OtpProcess, OtpProcessKind, OtpProcessStatus,
};
use crate::errors::{DomainError, OtpError};

use super::r#trait::OtpRepository;

/// In-memory OTP repository
pub struct InMemoryOtpRepository {
    codes: Arc<RwLock<HashMap<Uuid, OtpCode>>>,
    processes: Arc<RwLock<HashMap<Uuid, OtpProcess>>>,
    tokens: Arc<RwLock<HashMap<Uuid, OtpExchangeToken>>>,
}

impl InMemoryOtpRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            processes: Arc::new(RwLock::new(HashMap::new())),
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored codes, revoked ones included (audit retention)
    pub async fn code_count(&self) -> usize {
        self.codes.read().await.len()
    }

    /// Number of stored exchange tokens
    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for InMemoryOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn save_code(&self, code: OtpCode) -> Result<OtpCode, DomainError> {
        let mut codes = self.codes.write().await;

        // Uniqueness constraint on (user_id, process_kind, revoked_at = None)
        let conflict = codes.values().any(|c| {
            c.user_id == code.user_id && c.process_kind == code.process_kind && c.is_active()
        });
        if conflict {
            return Err(DomainError::Otp(OtpError::AlreadySent));
        }

        codes.insert(code.id, code.clone());
        Ok(code)
    }

    async fn find_active_code(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> Result<Option<OtpCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .find(|c| c.user_id == user_id && c.process_kind == process_kind && c.is_active())
            .cloned())
    }

    async fn revoke_code(&self, id: Uuid, revoked_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&id) {
            Some(code) if code.is_active() => {
                code.revoked_at = Some(revoked_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn save_process(&self, process: OtpProcess) -> Result<OtpProcess, DomainError> {
        let mut processes = self.processes.write().await;
        processes.insert(process.id, process.clone());
        Ok(process)
    }

    async fn find_process_by_code(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
        code_id: Uuid,
    ) -> Result<Option<OtpProcess>, DomainError> {
        let processes = self.processes.read().await;
        Ok(processes
            .values()
            .find(|p| {
                p.user_id == user_id && p.process_kind == process_kind && p.code_id == code_id
            })
            .cloned())
    }

    async fn set_process_status(
        &self,
        id: Uuid,
        status: OtpProcessStatus,
    ) -> Result<bool, DomainError> {
        let mut processes = self.processes.write().await;
        match processes.get_mut(&id) {
            Some(process) if !process.status.is_terminal() => {
                process.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_latest_verified_process(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> Result<Option<OtpProcess>, DomainError> {
        let processes = self.processes.read().await;
        Ok(processes
            .values()
            .filter(|p| {
                p.user_id == user_id
                    && p.process_kind == process_kind
                    && p.status == OtpProcessStatus::Verified
            })
            .max_by_key(|p| p.expires_at)
            .cloned())
    }

    async fn save_token(
        &self,
        token: OtpExchangeToken,
    ) -> Result<OtpExchangeToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_token(
        &self,
        user_id: Uuid,
        process_id: Uuid,
    ) -> Result<Option<OtpExchangeToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.user_id == user_id && t.process_id == process_id)
            .max_by_key(|t| t.expires_at)
            .cloned())
    }

    async fn find_active_token(
        &self,
        user_id: Uuid,
        process_kind: OtpProcessKind,
    ) -> Result<Option<OtpExchangeToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|t| t.user_id == user_id && t.process_kind == process_kind)
            .cloned())
    }

    async fn delete_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(&id).is_some())
    }
}
