use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jobportal_backend::error::Result;
use jobportal_backend::models::role::Role;
use jobportal_backend::repository::InMemoryApplicationRepository;
use jobportal_backend::services::ai_service::CompletionClient;
use jobportal_backend::services::captcha_service::CaptchaVerifier;
use jobportal_backend::services::BoxFuture;
use jobportal_backend::utils::token::issue_token;
use jobportal_backend::{build_router, AppState};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test_secret_key";

struct StubCaptcha {
    pass: bool,
}

impl CaptchaVerifier for StubCaptcha {
    fn verify<'a>(&'a self, _token: &'a str) -> BoxFuture<'a, Result<bool>> {
        let pass = self.pass;
        Box::pin(async move { Ok(pass) })
    }
}

struct ScriptedCompletion {
    reply: String,
}

impl CompletionClient for ScriptedCompletion {
    fn complete<'a>(&'a self, _: &'a str, _: &'a str) -> BoxFuture<'a, Result<String>> {
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }
}

fn test_app(captcha_pass: bool, completion_reply: &str) -> Router {
    let state = AppState::with_parts(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(StubCaptcha { pass: captcha_pass }),
        Arc::new(ScriptedCompletion {
            reply: completion_reply.to_string(),
        }),
        SECRET.to_string(),
        1,
    );
    build_router(state)
}

fn applicant_cookie(applicant_id: Uuid) -> String {
    let token = issue_token(applicant_id, Role::Applicant, SECRET, 1).unwrap();
    format!("ykapptoken={}", token)
}

fn recruiter_cookie() -> String {
    let token = issue_token(Uuid::new_v4(), Role::Recruiter, SECRET, 1).unwrap();
    format!("ykrectoken={}", token)
}

fn submit_body(applicant_id: Uuid) -> JsonValue {
    json!({
        "job_id": 42,
        "applicant_id": applicant_id,
        "status": "submitted",
        "resume": "Six years of backend development in Rust and Go.",
        "cover_letter": "I would love to join.",
        "keywords": ["rust", 5, "axum"],
        "captcha_token": "tok"
    })
}

async fn submit(app: &Router, applicant_id: Uuid, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri("/applicant/dashboard/applications")
        .header("content-type", "application/json")
        .header("cookie", applicant_cookie(applicant_id))
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

#[tokio::test]
async fn submit_creates_application_and_normalizes_keywords() {
    let app = test_app(true, "{}");
    let applicant_id = Uuid::new_v4();

    let (status, body) = submit(&app, applicant_id, submit_body(applicant_id)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "submitted");
    assert_eq!(body["keywords"], json!(["rust", "axum"]));
    assert!(body["score"].is_null());
}

#[tokio::test]
async fn submit_missing_resume_is_rejected() {
    let app = test_app(true, "{}");
    let applicant_id = Uuid::new_v4();
    let mut body = submit_body(applicant_id);
    body.as_object_mut().unwrap().remove("resume");

    let (status, body) = submit(&app, applicant_id, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("resume"));
}

#[tokio::test]
async fn submit_with_failing_captcha_is_rejected() {
    let app = test_app(false, "{}");
    let applicant_id = Uuid::new_v4();

    let (status, body) = submit(&app, applicant_id, submit_body(applicant_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Captcha"));
}

#[tokio::test]
async fn withdraw_twice_succeeds_and_stays_withdrawn() {
    let app = test_app(true, "{}");
    let applicant_id = Uuid::new_v4();
    let (_, created) = submit(&app, applicant_id, submit_body(applicant_id)).await;
    let id = created["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let req = Request::builder()
            .method("POST")
            .uri(format!("/applicant/dashboard/applications/{}/withdraw", id))
            .header("cookie", applicant_cookie(applicant_id))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "no-store"
        );
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "withdrawn");
    }
}

#[tokio::test]
async fn foreign_application_reads_as_not_found() {
    let app = test_app(true, "{}");
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let (_, created) = submit(&app, owner, submit_body(owner)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let fetch = |id: String, caller: Uuid| {
        let app = app.clone();
        async move {
            let req = Request::builder()
                .method("GET")
                .uri(format!("/applicant/dashboard/applications/{}", id))
                .header("cookie", applicant_cookie(caller))
                .body(Body::empty())
                .unwrap();
            let resp = app.oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
            (status, serde_json::from_slice::<JsonValue>(&bytes).unwrap())
        }
    };

    let (foreign_status, foreign_body) = fetch(id, stranger).await;
    let (missing_status, missing_body) = fetch(Uuid::new_v4().to_string(), owner).await;

    // Wrong owner and nonexistent id must be indistinguishable.
    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign_body, missing_body);
}

#[tokio::test]
async fn recruiter_score_is_a_partial_update() {
    let app = test_app(true, "{}");
    let applicant_id = Uuid::new_v4();
    let (_, created) = submit(&app, applicant_id, submit_body(applicant_id)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let post_score = |body: JsonValue| {
        let app = app.clone();
        let id = id.clone();
        async move {
            let req = Request::builder()
                .method("POST")
                .uri(format!("/recruiter/dashboard/applications/{}/score", id))
                .header("content-type", "application/json")
                .header("cookie", recruiter_cookie())
                .body(Body::from(body.to_string()))
                .unwrap();
            let resp = app.oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
            serde_json::from_slice::<JsonValue>(&bytes).unwrap()
        }
    };

    post_score(json!({ "strength": "solid fundamentals" })).await;
    let merged = post_score(json!({ "score": "88" })).await;

    assert_eq!(merged["score"], 88);
    assert_eq!(merged["strength"], "solid fundamentals");
}

#[tokio::test]
async fn screening_merges_fenced_model_verdict() {
    let reply = "```json\n{\"score\": 77, \"strength\": \"clear growth\", \"weakness\": \"no Rust\"}\n```";
    let app = test_app(true, reply);
    let applicant_id = Uuid::new_v4();
    let (_, created) = submit(&app, applicant_id, submit_body(applicant_id)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri(format!("/recruiter/dashboard/applications/{}/screen", id))
        .header("cookie", recruiter_cookie())
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["score"], 77);
    assert_eq!(body["strength"], "clear growth");
    assert_eq!(body["weakness"], "no Rust");
}

#[tokio::test]
async fn unparseable_model_reply_fails_without_writing() {
    let app = test_app(true, "I cannot answer in JSON today.");
    let applicant_id = Uuid::new_v4();
    let (_, created) = submit(&app, applicant_id, submit_body(applicant_id)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri(format!("/recruiter/dashboard/applications/{}/screen", id))
        .header("cookie", recruiter_cookie())
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    // The entity is untouched by the failed extraction.
    let req = Request::builder()
        .method("GET")
        .uri(format!("/applicant/dashboard/applications/{}", id))
        .header("cookie", applicant_cookie(applicant_id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(body["score"].is_null());
    assert!(body["strength"].is_null());
}

#[tokio::test]
async fn interview_questions_round_trip() {
    let app = test_app(true, "[{\"question\":\"Q\",\"answer\":\"A\"}]");
    let applicant_id = Uuid::new_v4();
    let (_, created) = submit(&app, applicant_id, submit_body(applicant_id)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri(format!("/recruiter/dashboard/applications/{}/questions", id))
        .header("cookie", recruiter_cookie())
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!([{"question": "Q", "answer": "A"}]));
}
