use crate::error::{Error, Result};
use crate::models::role::Role;
use crate::utils::token::decode_subject;
use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Pure routing decision: does `path` fall under a role's protected prefix,
/// and if so, does that exact role's token exist? Token presence is an
/// explicit lookup passed in by the caller, not ambient state. No
/// signature or expiry check happens here; that is downstream.
pub fn guard_route(path: &str, has_token: impl Fn(Role) -> bool) -> GuardDecision {
    for role in Role::ALL {
        if role.protects(path) {
            return if has_token(role) {
                GuardDecision::Allow
            } else {
                GuardDecision::Redirect(role.login_path().to_string())
            };
        }
    }
    GuardDecision::Allow
}

pub async fn session_guard(req: Request, next: Next) -> Response {
    let cookies = parse_cookies(req.headers());
    let decision = guard_route(req.uri().path(), |role| {
        cookies
            .get(role.cookie_name())
            .map_or(false, |v| !v.is_empty())
    });
    match decision {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::Redirect(to) => Redirect::to(&to).into_response(),
    }
}

/// Recovers the caller's identity from the role's session cookie. Used by
/// handlers behind the guard that need to know who is asking.
pub fn current_identity(headers: &HeaderMap, role: Role, secret: &str) -> Result<Uuid> {
    let cookies = parse_cookies(headers);
    let token = cookies
        .get(role.cookie_name())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Unauthorized("missing_session".to_string()))?;
    decode_subject(token, role, secret)
}

fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    let Some(header) = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
    else {
        return cookies;
    };
    for pair in header.split(';') {
        if let Some((name, value)) = pair.split_once('=') {
            cookies.insert(name.trim().to_string(), value.trim().to_string());
        }
    }
    cookies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(role: Role) -> impl Fn(Role) -> bool {
        move |r| r == role
    }

    #[test]
    fn unprotected_paths_pass_through() {
        assert_eq!(guard_route("/health", |_| false), GuardDecision::Allow);
        assert_eq!(
            guard_route("/applicant/login", |_| false),
            GuardDecision::Allow
        );
        // Prefix match is per path segment, not raw string prefix.
        assert_eq!(
            guard_route("/applicant/dashboarding", |_| false),
            GuardDecision::Allow
        );
    }

    #[test]
    fn protected_paths_redirect_to_the_role_login() {
        assert_eq!(
            guard_route("/applicant/dashboard/applications", |_| false),
            GuardDecision::Redirect("/applicant/login".to_string())
        );
        assert_eq!(
            guard_route("/recruiter/dashboard", |_| false),
            GuardDecision::Redirect("/recruiter/login".to_string())
        );
        assert_eq!(
            guard_route("/company/dashboard/stats", |_| false),
            GuardDecision::Redirect("/company/login".to_string())
        );
    }

    #[test]
    fn a_token_for_one_role_grants_nothing_elsewhere() {
        assert_eq!(
            guard_route("/applicant/dashboard/applications", only(Role::Applicant)),
            GuardDecision::Allow
        );
        assert_eq!(
            guard_route("/recruiter/dashboard/applications", only(Role::Applicant)),
            GuardDecision::Redirect("/recruiter/login".to_string())
        );
        assert_eq!(
            guard_route("/company/dashboard", only(Role::Recruiter)),
            GuardDecision::Redirect("/company/login".to_string())
        );
    }

    #[test]
    fn cookie_header_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            "ykapptoken=abc; other=1; ykrectoken=".parse().unwrap(),
        );
        let cookies = parse_cookies(&headers);
        assert_eq!(cookies.get("ykapptoken").map(String::as_str), Some("abc"));
        assert_eq!(cookies.get("ykrectoken").map(String::as_str), Some(""));
        assert!(!cookies.contains_key("missing"));
    }
}
