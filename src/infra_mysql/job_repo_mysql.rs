use super::util::{store_err, uuid_as_bytes, uuid_from_bytes};
use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, Job, JobId, JobKind, JobUpdate, Pagination};
use crate::domain_port::JobRepo;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlJobRepo {
    pool: MySqlPool,
}

const JOB_COLUMNS: &str = "id, company_id, title, description, kind, application_link, created_at";

impl MySqlJobRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlJobRepo { pool }
    }

    fn row_to_job(row: MySqlRow) -> Result<Job, ServiceError> {
        let id_bytes: Vec<u8> = row.try_get("id").map_err(store_err)?;
        let company_bytes: Vec<u8> = row.try_get("company_id").map_err(store_err)?;
        let kind_raw: String = row.try_get("kind").map_err(store_err)?;
        let kind = JobKind::parse(&kind_raw)
            .ok_or_else(|| ServiceError::Store(format!("unknown job kind '{}'", kind_raw)))?;

        Ok(Job {
            id: JobId(uuid_from_bytes(&id_bytes)?),
            company_id: CompanyId(uuid_from_bytes(&company_bytes)?),
            title: row.try_get("title").map_err(store_err)?,
            description: row.try_get("description").map_err(store_err)?,
            kind,
            application_link: row.try_get("application_link").map_err(store_err)?,
            created_at: row.try_get("created_at").map_err(store_err)?,
        })
    }
}

#[async_trait::async_trait]
impl JobRepo for MySqlJobRepo {
    async fn insert(&self, job: &Job) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
INSERT INTO job (id, company_id, title, description, kind, application_link, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(uuid_as_bytes(&job.id.0))
        .bind(uuid_as_bytes(&job.company_id.0))
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.kind.as_str())
        .bind(&job.application_link)
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn find(&self, id: JobId) -> Result<Option<Job>, ServiceError> {
        let row_opt: Option<MySqlRow> =
            sqlx::query(&format!("SELECT {} FROM job WHERE id = ?", JOB_COLUMNS))
                .bind(uuid_as_bytes(&id.0))
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;

        row_opt.map(Self::row_to_job).transpose()
    }

    async fn paginate(
        &self,
        p: &Pagination,
        company_id: Option<CompanyId>,
    ) -> Result<(Vec<Job>, u64), ServiceError> {
        let like = p.search.as_ref().map(|s| format!("%{}%", s));
        let company_bytes = company_id.map(|c| c.0.as_bytes().to_vec());

        let mut where_clauses: Vec<&str> = Vec::new();
        if company_bytes.is_some() {
            where_clauses.push("company_id = ?");
        }
        if like.is_some() {
            where_clauses.push("(title LIKE ? OR description LIKE ?)");
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let select_sql = format!(
            "SELECT {} FROM job {} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            JOB_COLUMNS, where_sql
        );
        let mut select = sqlx::query(&select_sql);
        if let Some(bytes) = &company_bytes {
            select = select.bind(bytes.as_slice());
        }
        if let Some(like) = &like {
            select = select.bind(like).bind(like);
        }
        let rows = select
            .bind(p.limit)
            .bind(p.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        let count_sql = format!("SELECT COUNT(*) FROM job {}", where_sql);
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(bytes) = &company_bytes {
            count = count.bind(bytes.as_slice());
        }
        if let Some(like) = &like {
            count = count.bind(like).bind(like);
        }
        let total = count.fetch_one(&self.pool).await.map_err(store_err)?;

        let jobs = rows
            .into_iter()
            .map(Self::row_to_job)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((jobs, total as u64))
    }

    async fn update(&self, id: JobId, update: &JobUpdate) -> Result<Option<Job>, ServiceError> {
        sqlx::query(
            r#"
UPDATE job
SET title = COALESCE(?, title),
    description = COALESCE(?, description),
    kind = COALESCE(?, kind),
    application_link = COALESCE(?, application_link)
WHERE id = ?
"#,
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.kind.map(|k| k.as_str()))
        .bind(&update.application_link)
        .bind(uuid_as_bytes(&id.0))
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        self.find(id).await
    }

    async fn delete(&self, id: JobId) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM job WHERE id = ?")
            .bind(uuid_as_bytes(&id.0))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }
}
