use super::util::{store_err, uuid_as_bytes, uuid_from_bytes};
use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, PersistedToken, TokenId, TokenKind};
use crate::domain_port::TokenRepo;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlTokenRepo {
    pool: MySqlPool,
}

impl MySqlTokenRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlTokenRepo { pool }
    }

    fn row_to_token(row: MySqlRow) -> Result<PersistedToken, ServiceError> {
        let id_bytes: Vec<u8> = row.try_get("id").map_err(store_err)?;
        let company_bytes: Vec<u8> = row.try_get("company_id").map_err(store_err)?;
        let kind_raw: String = row.try_get("kind").map_err(store_err)?;
        let kind = TokenKind::parse(&kind_raw)
            .ok_or_else(|| ServiceError::Store(format!("unknown token kind '{}'", kind_raw)))?;

        let secret: String = row.try_get("secret").map_err(store_err)?;
        let blacklisted: bool = row.try_get("blacklisted").map_err(store_err)?;
        let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(store_err)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(store_err)?;

        Ok(PersistedToken {
            id: TokenId(uuid_from_bytes(&id_bytes)?),
            secret,
            kind,
            company_id: CompanyId(uuid_from_bytes(&company_bytes)?),
            blacklisted,
            expires_at,
            created_at,
        })
    }
}

#[async_trait::async_trait]
impl TokenRepo for MySqlTokenRepo {
    async fn insert(&self, token: &PersistedToken) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
INSERT INTO token (id, secret, kind, company_id, blacklisted, expires_at, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(uuid_as_bytes(&token.id.0))
        .bind(&token.secret)
        .bind(token.kind.as_str())
        .bind(uuid_as_bytes(&token.company_id.0))
        .bind(token.blacklisted)
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn find_by_secret(
        &self,
        secret: &str,
        kind: TokenKind,
    ) -> Result<Option<PersistedToken>, ServiceError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT id, secret, kind, company_id, blacklisted, expires_at, created_at
FROM token
WHERE secret = ? AND kind = ?
"#,
        )
        .bind(secret)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row_opt.map(Self::row_to_token).transpose()
    }

    async fn delete(&self, id: TokenId) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM token WHERE id = ?")
            .bind(uuid_as_bytes(&id.0))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn blacklist_if_active(&self, id: TokenId) -> Result<bool, ServiceError> {
        // Conditional update; the affected-row count is the success signal,
        // so two concurrent rotations cannot both win.
        let result = sqlx::query(
            r#"
UPDATE token
SET blacklisted = TRUE
WHERE id = ? AND blacklisted = FALSE
"#,
        )
        .bind(uuid_as_bytes(&id.0))
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_all_for(
        &self,
        company_id: CompanyId,
        kind: TokenKind,
    ) -> Result<u64, ServiceError> {
        let result = sqlx::query("DELETE FROM token WHERE company_id = ? AND kind = ?")
            .bind(uuid_as_bytes(&company_id.0))
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected())
    }
}
