use crate::domain_model::CompanyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct JobId(pub uuid::Uuid);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(JobId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobKind {
    FullTime,
    PartTime,
    Internship,
    Contract,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::FullTime => "FULL_TIME",
            JobKind::PartTime => "PART_TIME",
            JobKind::Internship => "INTERNSHIP",
            JobKind::Contract => "CONTRACT",
        }
    }

    pub fn parse(s: &str) -> Option<JobKind> {
        match s {
            "FULL_TIME" => Some(JobKind::FullTime),
            "PART_TIME" => Some(JobKind::PartTime),
            "INTERNSHIP" => Some(JobKind::Internship),
            "CONTRACT" => Some(JobKind::Contract),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub kind: JobKind,
    pub application_link: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub kind: JobKind,
    pub application_link: String,
}

#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<JobKind>,
    pub application_link: Option<String>,
}
