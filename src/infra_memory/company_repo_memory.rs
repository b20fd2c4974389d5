use crate::application_port::ServiceError;
use crate::domain_model::{Company, CompanyId, CompanyProfileUpdate, Pagination};
use crate::domain_port::CompanyRepo;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryCompanyRepo {
    rows: Mutex<Vec<Company>>,
}

impl MemoryCompanyRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Company>>, ServiceError> {
        self.rows
            .lock()
            .map_err(|_| ServiceError::Store("company table mutex poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl CompanyRepo for MemoryCompanyRepo {
    async fn insert(&self, company: &Company) -> Result<bool, ServiceError> {
        let mut rows = self.lock()?;
        if rows.iter().any(|c| c.email == company.email) {
            return Ok(false);
        }
        rows.push(company.clone());
        Ok(true)
    }

    async fn find(&self, id: CompanyId) -> Result<Option<Company>, ServiceError> {
        Ok(self.lock()?.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, ServiceError> {
        Ok(self.lock()?.iter().find(|c| c.email == email).cloned())
    }

    async fn paginate(&self, p: &Pagination) -> Result<(Vec<Company>, u64), ServiceError> {
        let rows = self.lock()?;
        let mut matched: Vec<Company> = rows
            .iter()
            .filter(|c| match &p.search {
                Some(s) => c.name.contains(s.as_str()) || c.description.contains(s.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as u64;
        let page: Vec<Company> = matched
            .into_iter()
            .skip(p.offset() as usize)
            .take(p.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn update_profile(
        &self,
        id: CompanyId,
        update: &CompanyProfileUpdate,
    ) -> Result<Option<Company>, ServiceError> {
        let mut rows = self.lock()?;
        let Some(row) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            row.name = name.clone();
        }
        if let Some(website) = &update.website {
            row.website = website.clone();
        }
        if let Some(headquarter) = &update.headquarter {
            row.headquarter = headquarter.clone();
        }
        if let Some(logo) = &update.logo {
            row.logo = logo.clone();
        }
        if let Some(description) = &update.description {
            row.description = description.clone();
        }
        Ok(Some(row.clone()))
    }

    async fn update_password(
        &self,
        id: CompanyId,
        password_hash: &str,
    ) -> Result<(), ServiceError> {
        if let Some(row) = self.lock()?.iter_mut().find(|c| c.id == id) {
            row.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        id: CompanyId,
        at: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        if let Some(row) = self.lock()?.iter_mut().find(|c| c.id == id) {
            row.email_verified_at = Some(at);
        }
        Ok(())
    }
}
