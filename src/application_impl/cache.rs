use crate::application_port::ServiceError;
use crate::domain_port::CacheStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

/// Cache key namespace. Reads and invalidation must agree on these exact
/// shapes or stale entries survive mutations.
pub mod keys {
    use crate::domain_model::Pagination;

    pub fn entity(kind: &str, id: impl std::fmt::Display) -> String {
        format!("{}_{}", kind, id)
    }

    pub fn pagination(kind: &str, p: &Pagination) -> String {
        match &p.search {
            Some(search) => format!("{}_pagination_{}_{}_{}", kind, p.page, p.limit, search),
            None => format!("{}_pagination_{}_{}", kind, p.page, p.limit),
        }
    }

    pub fn scoped_pagination(
        scope: &str,
        scope_id: impl std::fmt::Display,
        kind: &str,
        p: &Pagination,
    ) -> String {
        format!("{}_{}_{}", scope, scope_id, pagination(kind, p))
    }

    pub fn pagination_pattern(kind: &str) -> String {
        format!("{}_pagination_*", kind)
    }

    pub fn scoped_pagination_pattern(
        scope: &str,
        scope_id: impl std::fmt::Display,
        kind: &str,
    ) -> String {
        format!("{}_{}_{}_pagination_*", scope, scope_id, kind)
    }
}

/// Read-through caching over the authoritative store. Cache trouble of any
/// kind degrades to a miss; the request never fails because of the cache.
pub struct CacheReader {
    store: Arc<dyn CacheStore>,
    ttl_secs: u64,
}

impl CacheReader {
    pub fn new(store: Arc<dyn CacheStore>, ttl_secs: u64) -> Self {
        CacheReader { store, ttl_secs }
    }

    pub async fn read<T, F, Fut>(&self, key: &str, compute: F) -> Result<T, ServiceError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>> + Send,
    {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => warn!(key, error = %e, "corrupt cache entry, recomputing"),
            },
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "cache get failed, treating as miss"),
        }

        let value = compute().await?;
        self.write(key, &value).await;
        Ok(value)
    }

    /// Best-effort population, also used as the write-through step after
    /// entity mutations.
    pub async fn write<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "cache serialize failed, skipping populate");
                return;
            }
        };
        if let Err(e) = self.store.set_ex(key, &raw, self.ttl_secs).await {
            warn!(key, error = %e, "cache set failed, entry not populated");
        }
    }
}

/// Removes entries made stale by a committed mutation. Called after the
/// datastore write, never before; a crash in between leaves entries that
/// expire with their TTL.
pub struct CacheInvalidator {
    store: Arc<dyn CacheStore>,
}

impl CacheInvalidator {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        CacheInvalidator { store }
    }

    pub async fn invalidate(&self, patterns: &[String], exact_keys: &[String]) {
        let mut keys: Vec<String> = Vec::new();
        for pattern in patterns {
            match self.store.scan_keys(pattern).await {
                Ok(found) => keys.extend(found),
                Err(e) => {
                    warn!(pattern = pattern.as_str(), error = %e, "cache scan failed")
                }
            }
        }
        keys.extend_from_slice(exact_keys);

        if keys.is_empty() {
            return;
        }
        if let Err(e) = self.store.del(&keys).await {
            warn!(error = %e, "cache delete failed, entries expire with TTL");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::Pagination;

    #[test]
    fn key_shapes() {
        let p = Pagination::normalized(Some(1), Some(20), None);
        assert_eq!(keys::pagination("job", &p), "job_pagination_1_20");

        let p = Pagination::normalized(Some(2), Some(10), Some("rust".into()));
        assert_eq!(keys::pagination("job", &p), "job_pagination_2_10_rust");
        assert_eq!(
            keys::scoped_pagination("company", "abc", "job", &p),
            "company_abc_job_pagination_2_10_rust"
        );
        assert_eq!(keys::entity("job", "abc"), "job_abc");
        assert_eq!(keys::pagination_pattern("company"), "company_pagination_*");
        assert_eq!(
            keys::scoped_pagination_pattern("company", "abc", "job"),
            "company_abc_job_pagination_*"
        );
    }

    #[test]
    fn listing_keys_never_collide_across_params() {
        let a = keys::pagination("job", &Pagination::normalized(Some(1), Some(20), None));
        let b = keys::pagination("job", &Pagination::normalized(Some(2), Some(20), None));
        let c = keys::pagination("job", &Pagination::normalized(Some(1), Some(10), None));
        let d = keys::pagination(
            "job",
            &Pagination::normalized(Some(1), Some(20), Some("x".into())),
        );
        let all = [a, b, c, d];
        for (i, k) in all.iter().enumerate() {
            for other in all.iter().skip(i + 1) {
                assert_ne!(k, other);
            }
        }
    }
}
