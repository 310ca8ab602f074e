use crate::error::{Error, Result};
use crate::services::BoxFuture;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Sends a prompt to an external language model and returns the raw reply
/// text. There is no contract that the reply is valid structured data; the
/// model may wrap it in prose or code fences. Parsing is the extractor's
/// job, not the client's.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> BoxFuture<'a, Result<String>>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, client: Client) -> Self {
        Self { client, api_key }
    }
}

impl CompletionClient for OpenAiClient {
    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let payload = serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": 0.2
            });

            let res = self
                .client
                .post("https://api.openai.com/v1/chat/completions")
                .bearer_auth(&self.api_key)
                .json(&payload)
                .timeout(Duration::from_secs(120))
                .send()
                .await?;

            if !res.status().is_success() {
                let status = res.status();
                let text = res.text().await.unwrap_or_default();
                return Err(Error::Upstream(anyhow::anyhow!(
                    "OpenAI API Error {}: {}",
                    status,
                    text
                )));
            }

            let body: JsonValue = res.json().await?;
            body.get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .and_then(|m| m.get("content"))
                .and_then(|c| c.as_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::Upstream(anyhow::anyhow!("Invalid OpenAI response format"))
                })
        })
    }
}
