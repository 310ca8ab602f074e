use crate::dto::application_dto::SubmitApplication;
use crate::error::Result;
use crate::middleware::session::current_identity;
use crate::models::role::Role;
use crate::routes::no_store;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

pub async fn submit_application(
    State(state): State<AppState>,
    Json(payload): Json<SubmitApplication>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.submit(payload).await?;
    tracing::info!(application_id = %application.id, job_id = application.job_id, "application submitted");
    Ok((StatusCode::CREATED, no_store(), Json(application)))
}

pub async fn list_applications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let applicant_id = current_identity(&headers, Role::Applicant, &state.jwt_secret)?;
    let applications = state.application_service.list_for_owner(applicant_id)?;
    Ok(Json(applications))
}

pub async fn get_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applicant_id = current_identity(&headers, Role::Applicant, &state.jwt_secret)?;
    let application = state.application_service.get_for_owner(id, applicant_id)?;
    Ok(Json(application))
}

pub async fn withdraw_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applicant_id = current_identity(&headers, Role::Applicant, &state.jwt_secret)?;
    let application = state.application_service.withdraw(id, applicant_id)?;
    tracing::info!(application_id = %id, "application withdrawn");
    Ok((no_store(), Json(application)))
}
