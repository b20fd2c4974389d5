use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct CompanyId(pub uuid::Uuid);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CompanyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(CompanyId)
    }
}

#[derive(Debug, Clone)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub website: String,
    pub headquarter: String,
    pub logo: String,
    pub description: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Allow-listed projection for responses and cache payloads. Built field by
/// field so the credential hash can never leak through a serializer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyPublic {
    pub id: CompanyId,
    pub name: String,
    pub email: String,
    pub website: String,
    pub headquarter: String,
    pub logo: String,
    pub description: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    pub fn to_public(&self) -> CompanyPublic {
        CompanyPublic {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            headquarter: self.headquarter.clone(),
            logo: self.logo.clone(),
            description: self.description.clone(),
            email_verified_at: self.email_verified_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompanyProfileUpdate {
    pub name: Option<String>,
    pub website: Option<String>,
    pub headquarter: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
}
