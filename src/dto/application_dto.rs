use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Submission payload. Required fields are `Option` so that presence is
/// checked by the service and reported as a validation failure rather than
/// a deserialization error. `score`/`strength`/`weakness` are accepted for
/// wire-shape compatibility but never stored from the applicant surface.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitApplication {
    pub job_id: Option<i64>,
    pub applicant_id: Option<Uuid>,
    pub status: Option<String>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub score: Option<JsonValue>,
    pub strength: Option<String>,
    pub weakness: Option<String>,
    pub keywords: Option<JsonValue>,
    pub captcha_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScorePayload {
    pub score: Option<JsonValue>,
    pub strength: Option<String>,
    pub weakness: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentsPayload {
    pub comments: String,
}
