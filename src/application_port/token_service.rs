use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, PersistedToken, TokenId, TokenKind};
use chrono::Duration;
use serde::Serialize;

/// Access + refresh pair handed out on login and rotation. Both strings are
/// envelope-wrapped; the refresh value goes into the session cookie.
#[derive(Debug, Clone, Serialize)]
pub struct SessionTokens {
    pub access_token: String,
    #[serde(skip_serializing)]
    pub refresh_token: String,
    #[serde(skip_serializing)]
    pub refresh_max_age_secs: i64,
}

/// Token Manager: stateless signed access tokens plus stored opaque tokens.
/// Expiry and blacklist policy on stateful tokens is applied by callers;
/// `resolve_stateful_token` only locates the row.
#[async_trait::async_trait]
pub trait TokenService: Send + Sync {
    /// Envelope-wrapped signed access token, TTL from configuration.
    fn issue_access_token(&self, company_id: CompanyId) -> Result<String, ServiceError>;

    /// Unwrap, verify signature and expiry (zero leeway), decode the
    /// subject. Stateless; never consults the store. Any failure is `None`.
    fn verify_access_token(&self, token: &str) -> Option<CompanyId>;

    /// Generate a random secret, persist the row, return the envelope form.
    /// The plaintext secret never leaves the manager.
    async fn issue_stateful_token(
        &self,
        company_id: CompanyId,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, ServiceError>;

    /// Unwrap the envelope (garbage -> `None`) and look up by exact
    /// secret + kind.
    async fn resolve_stateful_token(
        &self,
        envelope: &str,
        kind: TokenKind,
    ) -> Result<Option<PersistedToken>, ServiceError>;

    /// Hard-delete a one-shot token row.
    async fn consume(&self, id: TokenId) -> Result<(), ServiceError>;

    /// Atomic ACTIVE -> BLACKLISTED transition; `false` means the row was
    /// already spent (or gone), which callers treat as reuse.
    async fn blacklist_if_active(&self, id: TokenId) -> Result<bool, ServiceError>;

    /// Hard-delete every row of `kind` owned by the company.
    async fn revoke_all_for(&self, company_id: CompanyId, kind: TokenKind)
    -> Result<u64, ServiceError>;

    /// Mint the access + refresh pair used by login and rotation.
    async fn issue_session(&self, company_id: CompanyId) -> Result<SessionTokens, ServiceError>;
}
