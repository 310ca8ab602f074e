use crate::dto::application_dto::{ScorePayload, SubmitApplication};
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationDraft, ApplicationPatch, ApplicationStatus,
};
use crate::repository::ApplicationRepository;
use crate::services::captcha_service::CaptchaVerifier;
use crate::utils::extract::coerce_score;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

/// Orchestrates the application lifecycle: input validation and CAPTCHA
/// gating on creation, ownership-scoped reads, the one-way status machine,
/// and partial merges from the scoring path.
#[derive(Clone)]
pub struct ApplicationService {
    repo: Arc<dyn ApplicationRepository>,
    captcha: Arc<dyn CaptchaVerifier>,
}

impl ApplicationService {
    pub fn new(repo: Arc<dyn ApplicationRepository>, captcha: Arc<dyn CaptchaVerifier>) -> Self {
        Self { repo, captcha }
    }

    /// CAPTCHA is verified before any persistence write; a failing or
    /// unreachable oracle means `create` is never invoked.
    pub async fn submit(&self, payload: SubmitApplication) -> Result<Application> {
        let job_id = payload
            .job_id
            .ok_or_else(|| Error::Validation("job_id is required".to_string()))?;
        let applicant_id = payload
            .applicant_id
            .ok_or_else(|| Error::Validation("applicant_id is required".to_string()))?;
        if payload
            .status
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
        {
            return Err(Error::Validation("status is required".to_string()));
        }
        let resume = payload
            .resume
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| Error::Validation("resume is required".to_string()))?;
        let captcha_token = payload
            .captcha_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Validation("captcha_token is required".to_string()))?;

        if !self.captcha.verify(&captcha_token).await? {
            return Err(Error::Captcha(
                "Captcha verification failed".to_string(),
            ));
        }

        // Whatever status the caller sent, a new application starts
        // Submitted; score/strength/weakness from the payload are ignored.
        self.repo.create(ApplicationDraft {
            job_id,
            applicant_id,
            resume,
            cover_letter: payload.cover_letter.filter(|c| !c.trim().is_empty()),
            keywords: normalize_keywords(payload.keywords.as_ref()),
        })
    }

    /// Ownership mismatch and nonexistence are indistinguishable to the
    /// caller. Re-withdrawing an already withdrawn application succeeds
    /// silently and leaves the record unchanged.
    pub fn withdraw(&self, id: Uuid, caller_applicant_id: Uuid) -> Result<Application> {
        let app = self
            .repo
            .find_by_id_for_owner(id, caller_applicant_id)?
            .ok_or_else(not_found)?;
        if app.status.is_terminal() {
            return Ok(app);
        }
        self.repo.update(
            id,
            ApplicationPatch {
                status: Some(ApplicationStatus::Withdrawn),
                ..Default::default()
            },
        )
    }

    /// Privileged path: invoked by the scoring pipeline or a recruiter
    /// action. Absent fields are left untouched.
    pub fn record_score(&self, id: Uuid, payload: ScorePayload) -> Result<Application> {
        self.repo.update(
            id,
            ApplicationPatch {
                score: payload.score.as_ref().and_then(coerce_score),
                strength: payload.strength,
                weakness: payload.weakness,
                ..Default::default()
            },
        )
    }

    pub fn set_comments(&self, id: Uuid, comments: String) -> Result<Application> {
        self.repo.update(
            id,
            ApplicationPatch {
                comments: Some(comments),
                ..Default::default()
            },
        )
    }

    pub fn get(&self, id: Uuid) -> Result<Application> {
        self.repo.find_by_id(id)?.ok_or_else(not_found)
    }

    pub fn get_for_owner(&self, id: Uuid, caller_applicant_id: Uuid) -> Result<Application> {
        self.repo
            .find_by_id_for_owner(id, caller_applicant_id)?
            .ok_or_else(not_found)
    }

    pub fn list_for_owner(&self, caller_applicant_id: Uuid) -> Result<Vec<Application>> {
        self.repo.list_for_owner(caller_applicant_id)
    }
}

fn not_found() -> Error {
    Error::NotFound("Application not found".to_string())
}

/// Keywords policy: coerce, never reject. Absent or malformed input becomes
/// an empty sequence; non-string array items are skipped.
fn normalize_keywords(raw: Option<&JsonValue>) -> Vec<String> {
    match raw.and_then(|v| v.as_array()) {
        Some(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => Vec::new(),
    }
}
