use crate::application_port::ServiceError;
use crate::domain_model::{
    Company, CompanyId, CompanyProfileUpdate, CompanyPublic, Paginated, Pagination,
};

#[async_trait::async_trait]
pub trait CompanyService: Send + Sync {
    async fn find(&self, id: CompanyId) -> Result<Option<Company>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, ServiceError>;
    async fn paginate(&self, p: &Pagination) -> Result<Paginated<CompanyPublic>, ServiceError>;
    async fn update_profile(
        &self,
        id: CompanyId,
        update: CompanyProfileUpdate,
    ) -> Result<Company, ServiceError>;
}
