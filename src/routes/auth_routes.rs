use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::models::role::Role;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

pub async fn register(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let role = parse_role(&role)?;
    let account = state.auth_service.register(role, payload)?;
    tracing::info!(account_id = %account.id, role = role.as_str(), "account registered");
    Ok((StatusCode::CREATED, Json(account)))
}

/// Issues the role-namespaced session cookie. The guard only ever checks
/// this cookie's presence; handlers behind it decode the payload.
pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    let role = parse_role(&role)?;
    let (account, token) = state.auth_service.login(role, payload)?;
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        role.cookie_name(),
        token
    );
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "id": account.id, "role": role })),
    ))
}

fn parse_role(raw: &str) -> Result<Role> {
    raw.parse()
        .map_err(|_| Error::NotFound("Unknown role".to_string()))
}
