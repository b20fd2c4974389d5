use crate::application_port::ServiceError;
use crate::domain_port::CacheStore;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

pub struct RedisCacheStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisCacheStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisCacheStore {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    fn strip<'a>(&self, namespaced: &'a str) -> &'a str {
        namespaced
            .strip_prefix(&self.prefix)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(namespaced)
    }

    fn store_err(e: redis::RedisError) -> ServiceError {
        ServiceError::Store(e.to_string())
    }
}

#[async_trait::async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let mut conn = self.conn.clone();
        conn.get(self.key(key)).await.map_err(Self::store_err)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), ServiceError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(self.key(key), value, ttl_secs)
            .await
            .map_err(Self::store_err)?;
        Ok(())
    }

    async fn del(&self, keys: &[String]) -> Result<(), ServiceError> {
        if keys.is_empty() {
            return Ok(());
        }
        let namespaced: Vec<String> = keys.iter().map(|k| self.key(k)).collect();
        let mut conn = self.conn.clone();
        let _: () = conn.del(namespaced).await.map_err(Self::store_err)?;
        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, ServiceError> {
        let mut conn = self.conn.clone();
        let found: Vec<String> = conn
            .keys(self.key(pattern))
            .await
            .map_err(Self::store_err)?;
        Ok(found
            .iter()
            .map(|k| self.strip(k).to_string())
            .collect())
    }
}
