use crate::application_port::ServiceError;

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, ServiceError>;
}
