use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, PersistedToken, TokenId, TokenKind};

/// Sole owner of persisted token rows; no other component touches them.
#[async_trait::async_trait]
pub trait TokenRepo: Send + Sync {
    async fn insert(&self, token: &PersistedToken) -> Result<(), ServiceError>;

    /// Exact match on secret + kind. Expired and blacklisted rows are
    /// returned as-is; policy belongs to the caller.
    async fn find_by_secret(
        &self,
        secret: &str,
        kind: TokenKind,
    ) -> Result<Option<PersistedToken>, ServiceError>;

    async fn delete(&self, id: TokenId) -> Result<(), ServiceError>;

    /// Single conditional update flipping `blacklisted` only when it is
    /// still false, reporting success via the affected-row count. Two
    /// concurrent rotations of one token cannot both see `true`.
    async fn blacklist_if_active(&self, id: TokenId) -> Result<bool, ServiceError>;

    /// Hard-delete every row of `kind` owned by `company_id`, returning the
    /// number removed.
    async fn delete_all_for(
        &self,
        company_id: CompanyId,
        kind: TokenKind,
    ) -> Result<u64, ServiceError>;
}
