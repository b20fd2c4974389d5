use crate::domain_model::CompanyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct TokenId(pub uuid::Uuid);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of stateful token families. Access tokens are not listed:
/// they are self-contained and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Refresh,
    EmailVerification,
    ResetPassword,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Refresh => "REFRESH",
            TokenKind::EmailVerification => "EMAIL_VERIFICATION",
            TokenKind::ResetPassword => "RESET_PASSWORD",
        }
    }

    pub fn parse(s: &str) -> Option<TokenKind> {
        match s {
            "REFRESH" => Some(TokenKind::Refresh),
            "EMAIL_VERIFICATION" => Some(TokenKind::EmailVerification),
            "RESET_PASSWORD" => Some(TokenKind::ResetPassword),
            _ => None,
        }
    }
}

/// One stored opaque token. `blacklisted` flips to true only for REFRESH
/// rows spent during rotation; every other consumption hard-deletes the row.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedToken {
    pub id: TokenId,
    pub secret: String,
    pub kind: TokenKind,
    pub company_id: CompanyId,
    pub blacklisted: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PersistedToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
