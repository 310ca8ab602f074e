use crate::error::Result;
use crate::models::application::Application;
use crate::services::ai_service::CompletionClient;
use crate::utils::extract::{coerce_score, parse_lenient};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQa {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningVerdict {
    pub score: Option<i32>,
    pub strength: Option<String>,
    pub weakness: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    score: Option<JsonValue>,
    strength: Option<String>,
    weakness: Option<String>,
}

/// AI-scoring pipeline. Extraction runs before any repository write, so a
/// garbled model reply can never leave a half-merged entity behind.
#[derive(Clone)]
pub struct ScreeningService {
    completion: Arc<dyn CompletionClient>,
}

impl ScreeningService {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    pub async fn evaluate(&self, application: &Application) -> Result<ScreeningVerdict> {
        let system_prompt = r#"You are a Critical and Unbiased Senior HR Specialist.
Your task is to strictly evaluate how well a candidate's application matches the role they applied for.

Evaluation Rules:
1. BE STRICT. If the resume shows a fundamentally different profession, the score MUST be very low (0-10).
2. Transferable soft skills alone never justify a high score for a professional role.
3. Weigh the supplied keywords: each clearly evidenced keyword raises the score, each absent one lowers it.

Return JSON: { "score": <0-100>, "strength": "<one concise paragraph>", "weakness": "<one concise paragraph>" }."#;

        let user_prompt = format!(
            "Resume:\n{}\n\nCover letter:\n{}\n\nRole keywords: {}",
            application.resume,
            application.cover_letter.as_deref().unwrap_or("(none)"),
            application.keywords.join(", "),
        );

        let raw = self.completion.complete(system_prompt, &user_prompt).await?;
        let parsed: RawVerdict = parse_lenient(&raw)?;

        let verdict = ScreeningVerdict {
            score: parsed.score.as_ref().and_then(coerce_score),
            strength: parsed.strength,
            weakness: parsed.weakness,
        };
        tracing::info!(
            application_id = %application.id,
            score = ?verdict.score,
            "screening evaluation complete"
        );
        Ok(verdict)
    }

    pub async fn interview_questions(
        &self,
        application: &Application,
    ) -> Result<Vec<InterviewQa>> {
        let system_prompt = r#"You are a Senior Technical Recruiter preparing a screening interview.
Generate 5 interview questions tailored to the candidate's resume, each with a model answer.

Rules:
1. Questions must probe the candidate's claimed experience, not generic trivia.
2. Output a JSON array of objects: [{"question": "...", "answer": "..."}].
3. Keep answers concise reference answers for the interviewer."#;

        let user_prompt = format!(
            "Resume:\n{}\n\nRole keywords: {}",
            application.resume,
            application.keywords.join(", "),
        );

        let raw = self.completion.complete(system_prompt, &user_prompt).await?;
        parse_lenient(&raw)
    }
}
