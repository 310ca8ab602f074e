use crate::error::{Error, Result};
use crate::services::BoxFuture;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Human-verification oracle. `Ok(false)` means the token failed the check;
/// an unreachable or erroring verifier is an `Upstream` failure, not a
/// silent pass.
pub trait CaptchaVerifier: Send + Sync {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<bool>>;
}

#[derive(Clone)]
pub struct RecaptchaService {
    client: Client,
    secret: String,
}

impl RecaptchaService {
    pub fn new(secret: String, client: Client) -> Self {
        Self { client, secret }
    }
}

impl CaptchaVerifier for RecaptchaService {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<bool>> {
        Box::pin(async move {
            let res = self
                .client
                .post("https://www.google.com/recaptcha/api/siteverify")
                .form(&[("secret", self.secret.as_str()), ("response", token)])
                .timeout(Duration::from_secs(10))
                .send()
                .await?;

            if !res.status().is_success() {
                let status = res.status();
                let text = res.text().await.unwrap_or_default();
                return Err(Error::Upstream(anyhow::anyhow!(
                    "Captcha verifier error {}: {}",
                    status,
                    text
                )));
            }

            let body: JsonValue = res.json().await?;
            Ok(body
                .get("success")
                .and_then(|v| v.as_bool())
                .unwrap_or(false))
        })
    }
}
