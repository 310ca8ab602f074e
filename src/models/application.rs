use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Rejected,
    Hired,
    Withdrawn,
}

impl ApplicationStatus {
    /// Withdrawn is terminal: no transition leads out of it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Withdrawn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: i64,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    pub resume: String,
    pub cover_letter: Option<String>,
    pub score: Option<i32>,
    pub strength: Option<String>,
    pub weakness: Option<String>,
    pub keywords: Vec<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the caller supplies at creation; everything else is
/// server-assigned (id, status, timestamps).
#[derive(Debug, Clone)]
pub struct ApplicationDraft {
    pub job_id: i64,
    pub applicant_id: Uuid,
    pub resume: String,
    pub cover_letter: Option<String>,
    pub keywords: Vec<String>,
}

/// Partial update: absent fields are left untouched by the repository.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
    pub score: Option<i32>,
    pub strength: Option<String>,
    pub weakness: Option<String>,
    pub comments: Option<String>,
}
