use crate::application_port::{CompanyService, ServiceError};
use crate::domain_model::{
    Company, CompanyId, CompanyProfileUpdate, CompanyPublic, PageInfo, Paginated, Pagination,
};
use crate::domain_port::CompanyRepo;
use std::sync::Arc;

pub struct RealCompanyService {
    repo: Arc<dyn CompanyRepo>,
}

impl RealCompanyService {
    pub fn new(repo: Arc<dyn CompanyRepo>) -> Self {
        RealCompanyService { repo }
    }
}

#[async_trait::async_trait]
impl CompanyService for RealCompanyService {
    async fn find(&self, id: CompanyId) -> Result<Option<Company>, ServiceError> {
        self.repo.find(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, ServiceError> {
        self.repo.find_by_email(email).await
    }

    async fn paginate(&self, p: &Pagination) -> Result<Paginated<CompanyPublic>, ServiceError> {
        let (rows, total) = self.repo.paginate(p).await?;
        Ok(Paginated {
            info: PageInfo::compute(total, p.page, p.limit),
            data: rows.iter().map(Company::to_public).collect(),
        })
    }

    async fn update_profile(
        &self,
        id: CompanyId,
        update: CompanyProfileUpdate,
    ) -> Result<Company, ServiceError> {
        self.repo
            .update_profile(id, &update)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company", id))
    }
}
