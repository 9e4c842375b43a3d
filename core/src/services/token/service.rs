//! Main session token service implementation

use std::sync::Arc;

use chrono::TimeZone;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::session::{
    BlacklistEntry, Claims, RevokeReason, WhitelistEntry, JWT_AUDIENCE, JWT_ISSUER,
};
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthTokens;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::SessionRepository;
use crate::services::clock::Clock;

use super::config::{parse_ttl, TokenServiceConfig};

/// Session token service owning pair issuance, rotation and revocation
///
/// Every pair is registered in the whitelist at issuance and every consumed
/// or revoked jti lands in the blacklist; no token is trusted on signature
/// alone.
pub struct TokenService<S>
where
    S: SessionRepository,
{
    /// Whitelist/blacklist registry store
    repository: Arc<S>,
    /// Injected time source
    clock: Arc<dyn Clock>,
    /// Signing key
    encoding_key: EncodingKey,
    /// Verification key
    decoding_key: DecodingKey,
    /// Validation rules for live access tokens
    validation: Validation,
    /// Validation rules for refresh, where an expired access token is fine
    refresh_validation: Validation,
    /// Access token lifetime
    access_ttl: Duration,
    /// Refresh token lifetime
    refresh_ttl: Duration,
}

impl<S> TokenService<S>
where
    S: SessionRepository,
{
    /// Create a new token service
    ///
    /// Fails fast on unparseable TTL notation so a misconfigured deployment
    /// never issues tokens.
    pub fn new(
        repository: Arc<S>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> DomainResult<Self> {
        let access_ttl = parse_ttl(&config.access_token_ttl).map_err(DomainError::Token)?;
        let refresh_ttl = parse_ttl(&config.refresh_token_ttl).map_err(DomainError::Token)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.leeway = 0;

        let mut refresh_validation = validation.clone();
        refresh_validation.validate_exp = false;

        Ok(Self {
            repository,
            clock,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            refresh_validation,
            access_ttl,
            refresh_ttl,
        })
    }

    /// Issue a fresh access/refresh pair and whitelist it
    ///
    /// The whitelist row is built from the claims before signing, so pair
    /// bookkeeping never depends on decoding our own output.
    pub async fn issue_pair(&self, user: &User) -> DomainResult<AuthTokens> {
        let now = self.clock.now();
        let access_jti = Uuid::new_v4();
        let refresh_jti = Uuid::new_v4();

        let access_claims = Claims::new(user.id, &user.username, access_jti, now, self.access_ttl);
        let refresh_claims =
            Claims::new(user.id, &user.username, refresh_jti, now, self.refresh_ttl);

        let access_token = self.encode_jwt(&access_claims)?;
        let refresh_token = self.encode_jwt(&refresh_claims)?;

        self.repository
            .insert_whitelist(WhitelistEntry::new(
                user.id,
                &refresh_claims.jti,
                &access_claims.jti,
                now + self.refresh_ttl,
            ))
            .await?;

        tracing::info!(
            user_id = %user.id,
            access_jti = %access_jti,
            event = "token_pair_issued",
            "Issued new access/refresh pair"
        );

        Ok(AuthTokens::new(access_token, refresh_token))
    }

    /// Rotate the pair identified by an access jti
    ///
    /// The presented access jti must match a live whitelist row; rotation
    /// deletes the row, blacklists the consumed refresh jti and issues a
    /// fresh pair. A second rotation with the same access jti fails.
    pub async fn refresh(&self, access_jti: &str, user: &User) -> DomainResult<AuthTokens> {
        let entry = self
            .repository
            .find_by_pair_jti(access_jti)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        self.repository.delete_whitelist(entry.id).await?;
        self.repository
            .insert_blacklist(BlacklistEntry::new(
                entry.user_id,
                &entry.jti,
                entry.expires_at,
                self.clock.now(),
                RevokeReason::Refresh,
            ))
            .await?;

        tracing::info!(
            user_id = %user.id,
            event = "token_pair_rotated",
            "Consumed refresh token and rotated pair"
        );

        self.issue_pair(user).await
    }

    /// Revoke the session behind a verified access token
    ///
    /// Blacklists the access jti and cascades to its paired refresh token:
    /// the whitelist row is deleted and the refresh jti blacklisted, both
    /// with the logout reason.
    pub async fn revoke(&self, claims: &Claims) -> DomainResult<()> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;
        let expires_at = self.claims_expiry(claims)?;
        let now = self.clock.now();

        self.repository
            .insert_blacklist(BlacklistEntry::new(
                user_id,
                &claims.jti,
                expires_at,
                now,
                RevokeReason::Logout,
            ))
            .await?;

        if let Some(entry) = self.repository.find_by_pair_jti(&claims.jti).await? {
            self.repository.delete_whitelist(entry.id).await?;
            self.repository
                .insert_blacklist(BlacklistEntry::new(
                    entry.user_id,
                    &entry.jti,
                    entry.expires_at,
                    now,
                    RevokeReason::Logout,
                ))
                .await?;
        }

        tracing::info!(
            user_id = %user_id,
            jti = %claims.jti,
            event = "session_revoked",
            "Revoked access token and its paired refresh token"
        );

        Ok(())
    }

    /// Verify a live access token: signature, standard claims, blacklist
    pub async fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_jwt(token, &self.validation)?;

        if self.repository.is_blacklisted(&claims.jti).await? {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(claims)
    }

    /// Decode an access token for rotation, accepting expired signatures
    ///
    /// Signature, issuer, audience and the blacklist are still enforced;
    /// only the expiry check is skipped.
    pub async fn decode_for_refresh(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_jwt(token, &self.refresh_validation)?;

        if self.repository.is_blacklisted(&claims.jti).await? {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(claims)
    }

    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "token_signing_failed", "JWT signing failed");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    fn decode_jwt(&self, token: &str, validation: &Validation) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let err = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        TokenError::TokenNotYetValid
                    }
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(err)
            })
    }

    fn claims_expiry(&self, claims: &Claims) -> DomainResult<DateTime<Utc>> {
        Utc.timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(DomainError::Token(TokenError::InvalidTokenFormat))
    }
}
