use crate::dto::application_dto::{CommentsPayload, ScorePayload};
use crate::error::Result;
use crate::middleware::session::current_identity;
use crate::models::role::Role;
use crate::routes::no_store;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

pub async fn get_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    current_identity(&headers, Role::Recruiter, &state.jwt_secret)?;
    let application = state.application_service.get(id)?;
    Ok(Json(application))
}

pub async fn score_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ScorePayload>,
) -> Result<impl IntoResponse> {
    let recruiter_id = current_identity(&headers, Role::Recruiter, &state.jwt_secret)?;
    let application = state.application_service.record_score(id, payload)?;
    tracing::info!(application_id = %id, recruiter = %recruiter_id, "score recorded");
    Ok((no_store(), Json(application)))
}

pub async fn comment_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<CommentsPayload>,
) -> Result<impl IntoResponse> {
    let recruiter_id = current_identity(&headers, Role::Recruiter, &state.jwt_secret)?;
    let application = state.application_service.set_comments(id, payload.comments)?;
    tracing::info!(application_id = %id, recruiter = %recruiter_id, "comments updated");
    Ok((no_store(), Json(application)))
}

/// Runs the AI evaluation and merges the verdict into the entity. A failed
/// extraction aborts before any write; the caller sees the failure, never
/// an application silently scored null.
pub async fn screen_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    current_identity(&headers, Role::Recruiter, &state.jwt_secret)?;
    let application = state.application_service.get(id)?;
    let verdict = state.screening_service.evaluate(&application).await?;
    let updated = state.application_service.record_score(
        id,
        ScorePayload {
            score: verdict.score.map(JsonValue::from),
            strength: verdict.strength,
            weakness: verdict.weakness,
        },
    )?;
    Ok((no_store(), Json(updated)))
}

pub async fn interview_questions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    current_identity(&headers, Role::Recruiter, &state.jwt_secret)?;
    let application = state.application_service.get(id)?;
    let questions = state.screening_service.interview_questions(&application).await?;
    Ok(Json(questions))
}
