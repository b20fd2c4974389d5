use crate::application_port::{JobService, ServiceError};
use crate::domain_model::{
    CompanyId, Job, JobDraft, JobId, JobUpdate, PageInfo, Paginated, Pagination,
};
use crate::domain_port::JobRepo;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct RealJobService {
    repo: Arc<dyn JobRepo>,
}

impl RealJobService {
    pub fn new(repo: Arc<dyn JobRepo>) -> Self {
        RealJobService { repo }
    }
}

#[async_trait::async_trait]
impl JobService for RealJobService {
    async fn find(&self, id: JobId) -> Result<Option<Job>, ServiceError> {
        self.repo.find(id).await
    }

    async fn paginate(
        &self,
        p: &Pagination,
        company_id: Option<CompanyId>,
    ) -> Result<Paginated<Job>, ServiceError> {
        let (rows, total) = self.repo.paginate(p, company_id).await?;
        Ok(Paginated {
            info: PageInfo::compute(total, p.page, p.limit),
            data: rows,
        })
    }

    async fn create(&self, company_id: CompanyId, draft: JobDraft) -> Result<Job, ServiceError> {
        let job = Job {
            id: JobId(Uuid::new_v4()),
            company_id,
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            application_link: draft.application_link,
            created_at: Utc::now(),
        };
        self.repo.insert(&job).await?;
        Ok(job)
    }

    async fn update(&self, id: JobId, update: JobUpdate) -> Result<Job, ServiceError> {
        self.repo
            .update(id, &update)
            .await?
            .ok_or_else(|| ServiceError::not_found("Job", id))
    }

    async fn delete(&self, id: JobId) -> Result<(), ServiceError> {
        self.repo.delete(id).await
    }
}
