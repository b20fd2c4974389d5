use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, Job, JobId, JobUpdate, Pagination};

#[async_trait::async_trait]
pub trait JobRepo: Send + Sync {
    async fn insert(&self, job: &Job) -> Result<(), ServiceError>;
    async fn find(&self, id: JobId) -> Result<Option<Job>, ServiceError>;

    /// Newest first; search matches title or description; `company_id`
    /// scopes the listing to one poster.
    async fn paginate(
        &self,
        p: &Pagination,
        company_id: Option<CompanyId>,
    ) -> Result<(Vec<Job>, u64), ServiceError>;

    async fn update(&self, id: JobId, update: &JobUpdate) -> Result<Option<Job>, ServiceError>;
    async fn delete(&self, id: JobId) -> Result<(), ServiceError>;
}
