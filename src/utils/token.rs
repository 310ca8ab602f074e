use crate::error::{Error, Result};
use crate::models::role::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

pub fn issue_token(subject: Uuid, role: Role, secret: &str, ttl_hours: i64) -> Result<String> {
    let exp = Utc::now() + Duration::hours(ttl_hours);
    let claims = Claims {
        sub: subject.to_string(),
        role: role.as_str().to_string(),
        exp: exp.timestamp() as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Token signing failed: {}", e)))
}

/// Decodes and verifies a session token for the given role namespace,
/// returning the subject id. Signature, expiry, and role binding are all
/// checked here; the route guard only checks presence.
pub fn decode_subject(token: &str, role: Role, secret: &str) -> Result<Uuid> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;

    if data.claims.role != role.as_str() {
        return Err(Error::Unauthorized("wrong_role".to_string()));
    }
    data.claims
        .sub
        .parse()
        .map_err(|_| Error::Unauthorized("invalid_token".to_string()))
}
