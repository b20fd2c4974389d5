use crate::application_port::ServiceError;
use crate::domain_model::{CompanyId, Job, JobId, JobUpdate, Pagination};
use crate::domain_port::JobRepo;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryJobRepo {
    rows: Mutex<Vec<Job>>,
}

impl MemoryJobRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Job>>, ServiceError> {
        self.rows
            .lock()
            .map_err(|_| ServiceError::Store("job table mutex poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl JobRepo for MemoryJobRepo {
    async fn insert(&self, job: &Job) -> Result<(), ServiceError> {
        self.lock()?.push(job.clone());
        Ok(())
    }

    async fn find(&self, id: JobId) -> Result<Option<Job>, ServiceError> {
        Ok(self.lock()?.iter().find(|j| j.id == id).cloned())
    }

    async fn paginate(
        &self,
        p: &Pagination,
        company_id: Option<CompanyId>,
    ) -> Result<(Vec<Job>, u64), ServiceError> {
        let rows = self.lock()?;
        let mut matched: Vec<Job> = rows
            .iter()
            .filter(|j| company_id.is_none_or(|cid| j.company_id == cid))
            .filter(|j| match &p.search {
                Some(s) => j.title.contains(s.as_str()) || j.description.contains(s.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as u64;
        let page: Vec<Job> = matched
            .into_iter()
            .skip(p.offset() as usize)
            .take(p.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(&self, id: JobId, update: &JobUpdate) -> Result<Option<Job>, ServiceError> {
        let mut rows = self.lock()?;
        let Some(row) = rows.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &update.title {
            row.title = title.clone();
        }
        if let Some(description) = &update.description {
            row.description = description.clone();
        }
        if let Some(kind) = update.kind {
            row.kind = kind;
        }
        if let Some(link) = &update.application_link {
            row.application_link = link.clone();
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: JobId) -> Result<(), ServiceError> {
        self.lock()?.retain(|j| j.id != id);
        Ok(())
    }
}
