use crate::application_port::ServiceError;
use crate::domain_port::Mailer;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailKind {
    Verification,
    ResetPassword,
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub kind: MailKind,
    pub to: String,
    pub token: String,
}

/// Captures outbound mail so tests can pick up the emailed token the way a
/// user would follow the link.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_token(&self, kind: MailKind) -> Option<String> {
        self.sent
            .lock()
            .ok()?
            .iter()
            .rev()
            .find(|m| m.kind == kind)
            .map(|m| m.token.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn record(&self, mail: SentMail) -> Result<(), ServiceError> {
        self.sent
            .lock()
            .map_err(|_| ServiceError::Store("mailbox mutex poisoned".to_string()))?
            .push(mail);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Mailer for MemoryMailer {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), ServiceError> {
        self.record(SentMail {
            kind: MailKind::Verification,
            to: to.to_string(),
            token: token.to_string(),
        })
    }

    async fn send_reset_password_email(&self, to: &str, token: &str) -> Result<(), ServiceError> {
        self.record(SentMail {
            kind: MailKind::ResetPassword,
            to: to.to_string(),
            token: token.to_string(),
        })
    }
}
