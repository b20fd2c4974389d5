use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, PersistedToken, TokenId, TokenKind};
use crate::domain_port::TokenRepo;
use std::sync::Mutex;

/// Table-in-a-mutex token store. The mutex gives the same atomicity the
/// mysql implementation gets from its conditional UPDATE.
#[derive(Default)]
pub struct MemoryTokenRepo {
    rows: Mutex<Vec<PersistedToken>>,
}

impl MemoryTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<PersistedToken>>, ServiceError> {
        self.rows
            .lock()
            .map_err(|_| ServiceError::Store("token table mutex poisoned".to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn rows_for(&self, company_id: CompanyId, kind: TokenKind) -> Vec<PersistedToken> {
        self.rows
            .lock()
            .map(|rows| {
                rows.iter()
                    .filter(|t| t.company_id == company_id && t.kind == kind)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl TokenRepo for MemoryTokenRepo {
    async fn insert(&self, token: &PersistedToken) -> Result<(), ServiceError> {
        self.lock()?.push(token.clone());
        Ok(())
    }

    async fn find_by_secret(
        &self,
        secret: &str,
        kind: TokenKind,
    ) -> Result<Option<PersistedToken>, ServiceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|t| t.secret == secret && t.kind == kind)
            .cloned())
    }

    async fn delete(&self, id: TokenId) -> Result<(), ServiceError> {
        self.lock()?.retain(|t| t.id != id);
        Ok(())
    }

    async fn blacklist_if_active(&self, id: TokenId) -> Result<bool, ServiceError> {
        let mut rows = self.lock()?;
        match rows.iter_mut().find(|t| t.id == id && !t.blacklisted) {
            Some(row) => {
                row.blacklisted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all_for(
        &self,
        company_id: CompanyId,
        kind: TokenKind,
    ) -> Result<u64, ServiceError> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|t| !(t.company_id == company_id && t.kind == kind));
        Ok((before - rows.len()) as u64)
    }
}
