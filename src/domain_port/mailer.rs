use crate::application_port::ServiceError;

/// Outbound mail. Delivery is external; the service layer only hands over
/// the recipient and the envelope-wrapped token for the emailed link.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), ServiceError>;
    async fn send_reset_password_email(&self, to: &str, token: &str) -> Result<(), ServiceError>;
}
