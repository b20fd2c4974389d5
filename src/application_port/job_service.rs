use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, Job, JobDraft, JobId, JobUpdate, Paginated, Pagination};

#[async_trait::async_trait]
pub trait JobService: Send + Sync {
    async fn find(&self, id: JobId) -> Result<Option<Job>, ServiceError>;
    async fn paginate(
        &self,
        p: &Pagination,
        company_id: Option<CompanyId>,
    ) -> Result<Paginated<Job>, ServiceError>;
    async fn create(&self, company_id: CompanyId, draft: JobDraft) -> Result<Job, ServiceError>;
    async fn update(&self, id: JobId, update: JobUpdate) -> Result<Job, ServiceError>;
    async fn delete(&self, id: JobId) -> Result<(), ServiceError>;
}
