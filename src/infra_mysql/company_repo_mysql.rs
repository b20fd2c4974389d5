use super::util::{store_err, uuid_as_bytes, uuid_from_bytes};
use crate::application_port::ServiceError;
use crate::domain_model::{Company, CompanyId, CompanyProfileUpdate, Pagination};
use crate::domain_port::CompanyRepo;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlCompanyRepo {
    pool: MySqlPool,
}

const COMPANY_COLUMNS: &str = "id, name, email, password_hash, website, headquarter, logo, description, email_verified_at, created_at";

impl MySqlCompanyRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlCompanyRepo { pool }
    }

    fn row_to_company(row: MySqlRow) -> Result<Company, ServiceError> {
        let id_bytes: Vec<u8> = row.try_get("id").map_err(store_err)?;
        let email_verified_at: Option<DateTime<Utc>> =
            row.try_get("email_verified_at").map_err(store_err)?;

        Ok(Company {
            id: CompanyId(uuid_from_bytes(&id_bytes)?),
            name: row.try_get("name").map_err(store_err)?,
            email: row.try_get("email").map_err(store_err)?,
            password_hash: row.try_get("password_hash").map_err(store_err)?,
            website: row.try_get("website").map_err(store_err)?,
            headquarter: row.try_get("headquarter").map_err(store_err)?,
            logo: row.try_get("logo").map_err(store_err)?,
            description: row.try_get("description").map_err(store_err)?,
            email_verified_at,
            created_at: row.try_get("created_at").map_err(store_err)?,
        })
    }
}

#[async_trait::async_trait]
impl CompanyRepo for MySqlCompanyRepo {
    async fn insert(&self, company: &Company) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            r#"
INSERT INTO company (id, name, email, password_hash, website, headquarter, logo, description, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(uuid_as_bytes(&company.id.0))
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.password_hash)
        .bind(&company.website)
        .bind(&company.headquarter)
        .bind(&company.logo)
        .bind(&company.description)
        .bind(company.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            // unique key on email carries the duplicate signal
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(false),
            Err(e) => Err(store_err(e)),
        }
    }

    async fn find(&self, id: CompanyId) -> Result<Option<Company>, ServiceError> {
        let row_opt: Option<MySqlRow> = sqlx::query(&format!(
            "SELECT {} FROM company WHERE id = ?",
            COMPANY_COLUMNS
        ))
        .bind(uuid_as_bytes(&id.0))
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row_opt.map(Self::row_to_company).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, ServiceError> {
        let row_opt: Option<MySqlRow> = sqlx::query(&format!(
            "SELECT {} FROM company WHERE email = ?",
            COMPANY_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row_opt.map(Self::row_to_company).transpose()
    }

    async fn paginate(&self, p: &Pagination) -> Result<(Vec<Company>, u64), ServiceError> {
        let like = p.search.as_ref().map(|s| format!("%{}%", s));

        let rows: Vec<MySqlRow> = match &like {
            Some(like) => {
                sqlx::query(&format!(
                    r#"
SELECT {} FROM company
WHERE name LIKE ? OR description LIKE ?
ORDER BY created_at DESC
LIMIT ? OFFSET ?
"#,
                    COMPANY_COLUMNS
                ))
                .bind(like)
                .bind(like)
                .bind(p.limit)
                .bind(p.offset())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM company ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    COMPANY_COLUMNS
                ))
                .bind(p.limit)
                .bind(p.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(store_err)?;

        let total: i64 = match &like {
            Some(like) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM company WHERE name LIKE ? OR description LIKE ?",
                )
                .bind(like)
                .bind(like)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM company")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(store_err)?;

        let companies = rows
            .into_iter()
            .map(Self::row_to_company)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((companies, total as u64))
    }

    async fn update_profile(
        &self,
        id: CompanyId,
        update: &CompanyProfileUpdate,
    ) -> Result<Option<Company>, ServiceError> {
        sqlx::query(
            r#"
UPDATE company
SET name = COALESCE(?, name),
    website = COALESCE(?, website),
    headquarter = COALESCE(?, headquarter),
    logo = COALESCE(?, logo),
    description = COALESCE(?, description)
WHERE id = ?
"#,
        )
        .bind(&update.name)
        .bind(&update.website)
        .bind(&update.headquarter)
        .bind(&update.logo)
        .bind(&update.description)
        .bind(uuid_as_bytes(&id.0))
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        self.find(id).await
    }

    async fn update_password(
        &self,
        id: CompanyId,
        password_hash: &str,
    ) -> Result<(), ServiceError> {
        sqlx::query("UPDATE company SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(uuid_as_bytes(&id.0))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        id: CompanyId,
        at: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        sqlx::query("UPDATE company SET email_verified_at = ? WHERE id = ?")
            .bind(at)
            .bind(uuid_as_bytes(&id.0))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }
}
