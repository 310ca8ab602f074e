pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod utils;

use crate::repository::{
    ApplicationRepository, InMemoryAccountRepository, InMemoryApplicationRepository,
};
use crate::services::{
    ai_service::{CompletionClient, OpenAiClient},
    application_service::ApplicationService,
    auth_service::AuthService,
    captcha_service::{CaptchaVerifier, RecaptchaService},
    screening_service::ScreeningService,
};
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub application_service: ApplicationService,
    pub screening_service: ScreeningService,
    pub auth_service: AuthService,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        Self::with_parts(
            Arc::new(InMemoryApplicationRepository::default()),
            Arc::new(RecaptchaService::new(
                config.recaptcha_secret.clone(),
                http_client.clone(),
            )),
            Arc::new(OpenAiClient::new(
                config.openai_api_key.clone(),
                http_client,
            )),
            config.jwt_secret.clone(),
            config.token_ttl_hours,
        )
    }

    /// Wiring point for tests: any repository and oracle doubles, no
    /// environment needed.
    pub fn with_parts(
        repo: Arc<dyn ApplicationRepository>,
        captcha: Arc<dyn CaptchaVerifier>,
        completion: Arc<dyn CompletionClient>,
        jwt_secret: String,
        token_ttl_hours: i64,
    ) -> Self {
        let application_service = ApplicationService::new(repo, captcha);
        let screening_service = ScreeningService::new(completion);
        let auth_service = AuthService::new(
            Arc::new(InMemoryAccountRepository::default()),
            jwt_secret.clone(),
            token_ttl_hours,
        );
        Self {
            application_service,
            screening_service,
            auth_service,
            jwt_secret,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/:role/register", post(routes::auth_routes::register))
        .route("/:role/login", post(routes::auth_routes::login))
        .route(
            "/applicant/dashboard/applications",
            post(routes::applicant_routes::submit_application)
                .get(routes::applicant_routes::list_applications),
        )
        .route(
            "/applicant/dashboard/applications/:id",
            get(routes::applicant_routes::get_application),
        )
        .route(
            "/applicant/dashboard/applications/:id/withdraw",
            post(routes::applicant_routes::withdraw_application),
        )
        .route(
            "/recruiter/dashboard/applications/:id",
            get(routes::recruiter_routes::get_application),
        )
        .route(
            "/recruiter/dashboard/applications/:id/score",
            post(routes::recruiter_routes::score_application),
        )
        .route(
            "/recruiter/dashboard/applications/:id/comments",
            post(routes::recruiter_routes::comment_application),
        )
        .route(
            "/recruiter/dashboard/applications/:id/screen",
            post(routes::recruiter_routes::screen_application),
        )
        .route(
            "/recruiter/dashboard/applications/:id/questions",
            post(routes::recruiter_routes::interview_questions),
        )
        .layer(axum::middleware::from_fn(
            middleware::session::session_guard,
        ))
        .with_state(state)
}
