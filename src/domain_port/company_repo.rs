use crate::application_port::ServiceError;
use crate::domain_model::{Company, CompanyId, CompanyProfileUpdate, Pagination};
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait CompanyRepo: Send + Sync {
    /// Returns false without inserting when the email is already taken.
    async fn insert(&self, company: &Company) -> Result<bool, ServiceError>;
    async fn find(&self, id: CompanyId) -> Result<Option<Company>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, ServiceError>;

    /// Newest first; search matches name or description.
    async fn paginate(&self, p: &Pagination) -> Result<(Vec<Company>, u64), ServiceError>;

    async fn update_profile(
        &self,
        id: CompanyId,
        update: &CompanyProfileUpdate,
    ) -> Result<Option<Company>, ServiceError>;
    async fn update_password(
        &self,
        id: CompanyId,
        password_hash: &str,
    ) -> Result<(), ServiceError>;
    async fn mark_email_verified(
        &self,
        id: CompanyId,
        at: DateTime<Utc>,
    ) -> Result<(), ServiceError>;
}
