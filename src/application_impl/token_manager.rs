use crate::application_impl::EnvelopeCodec;
use crate::application_port::{ServiceError, SessionTokens, TokenService};
use crate::domain_model::{CompanyId, PersistedToken, TokenId, TokenKind};
use crate::domain_port::TokenRepo;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const OPAQUE_SECRET_BYTES: usize = 24;

#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 signing secret; distinct from the envelope key.
    pub access_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String,
    exp: i64,
    iat: i64,
}

pub struct TokenManager {
    repo: Arc<dyn TokenRepo>,
    envelope: EnvelopeCodec,
    cfg: TokenConfig,
}

impl TokenManager {
    pub fn new(repo: Arc<dyn TokenRepo>, envelope: EnvelopeCodec, cfg: TokenConfig) -> Self {
        TokenManager {
            repo,
            envelope,
            cfg,
        }
    }

    fn generate_opaque_secret() -> String {
        let mut bytes = [0u8; OPAQUE_SECRET_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }
}

#[async_trait::async_trait]
impl TokenService for TokenManager {
    fn issue_access_token(&self, company_id: CompanyId) -> Result<String, ServiceError> {
        let iat = Utc::now();
        let claims = AccessClaims {
            sub: company_id.to_string(),
            exp: (iat + self.cfg.access_ttl).timestamp(),
            iat: iat.timestamp(),
        };
        let jwt = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.cfg.access_secret),
        )
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.envelope.encrypt(&jwt)
    }

    fn verify_access_token(&self, token: &str) -> Option<CompanyId> {
        let jwt = self.envelope.decrypt(token)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        let data = decode::<AccessClaims>(
            &jwt,
            &DecodingKey::from_secret(&self.cfg.access_secret),
            &validation,
        )
        .ok()?;

        // exp == now counts as expired, so a zero max-age never verifies
        if data.claims.exp <= Utc::now().timestamp() {
            return None;
        }

        data.claims.sub.parse::<CompanyId>().ok()
    }

    async fn issue_stateful_token(
        &self,
        company_id: CompanyId,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let secret = Self::generate_opaque_secret();
        let token = PersistedToken {
            id: TokenId(Uuid::new_v4()),
            secret: secret.clone(),
            kind,
            company_id,
            blacklisted: false,
            expires_at: now + ttl,
            created_at: now,
        };
        self.repo.insert(&token).await?;
        self.envelope.encrypt(&secret)
    }

    async fn resolve_stateful_token(
        &self,
        envelope: &str,
        kind: TokenKind,
    ) -> Result<Option<PersistedToken>, ServiceError> {
        let Some(secret) = self.envelope.decrypt(envelope) else {
            return Ok(None);
        };
        self.repo.find_by_secret(&secret, kind).await
    }

    async fn consume(&self, id: TokenId) -> Result<(), ServiceError> {
        self.repo.delete(id).await
    }

    async fn blacklist_if_active(&self, id: TokenId) -> Result<bool, ServiceError> {
        self.repo.blacklist_if_active(id).await
    }

    async fn revoke_all_for(
        &self,
        company_id: CompanyId,
        kind: TokenKind,
    ) -> Result<u64, ServiceError> {
        self.repo.delete_all_for(company_id, kind).await
    }

    async fn issue_session(&self, company_id: CompanyId) -> Result<SessionTokens, ServiceError> {
        let access_token = self.issue_access_token(company_id)?;
        let refresh_token = self
            .issue_stateful_token(company_id, TokenKind::Refresh, self.cfg.refresh_ttl)
            .await?;
        Ok(SessionTokens {
            access_token,
            refresh_token,
            refresh_max_age_secs: self.cfg.refresh_ttl.num_seconds(),
        })
    }
}
