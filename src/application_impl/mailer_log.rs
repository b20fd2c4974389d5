use crate::application_port::ServiceError;
use crate::domain_port::Mailer;
use tracing::info;

/// Stand-in for the SMTP transport: records what would be sent. Real
/// delivery lives outside this service.
pub struct LogMailer;

#[async_trait::async_trait]
impl Mailer for LogMailer {
    async fn send_verification_email(&self, to: &str, _token: &str) -> Result<(), ServiceError> {
        info!(to, "verification email queued");
        Ok(())
    }

    async fn send_reset_password_email(&self, to: &str, _token: &str) -> Result<(), ServiceError> {
        info!(to, "reset password email queued");
        Ok(())
    }
}
