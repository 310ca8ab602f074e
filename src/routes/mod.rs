pub mod applicant_routes;
pub mod auth_routes;
pub mod health;
pub mod recruiter_routes;

use axum::http::{header, HeaderName, HeaderValue};

/// Mutating handlers answer with `Cache-Control: no-store` so a cached
/// detail view is never trusted after a mutation.
pub(crate) fn no_store() -> [(HeaderName, HeaderValue); 1] {
    [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))]
}
