use crate::application_port::ServiceError;

/// Key-value cache. Entries are derived, disposable artifacts; the cache
/// may be wholly absent without breaking correctness, only latency.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError>;
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), ServiceError>;
    async fn del(&self, keys: &[String]) -> Result<(), ServiceError>;

    /// Enumerate keys matching a trailing-wildcard pattern such as
    /// `job_pagination_*`.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, ServiceError>;
}
