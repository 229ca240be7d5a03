use crate::config::openai_api_key;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

pub const MODEL: &str = "gpt-4o-mini";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// One system/user turn against a chat-completion model. Temperature
/// and token budget vary per use case (chat, extraction, synthesis).
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        OpenAiClient { http, api_key }
    }

    pub fn from_env(http: &reqwest::Client) -> Result<Self> {
        Ok(OpenAiClient::new(http.clone(), openai_api_key()?))
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response.json().await?;

        if !status.is_success() {
            let message = payload["error"]["message"].as_str().unwrap_or("Unknown error");
            return Err(anyhow!("OpenAI API error: {message}"));
        }

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("OpenAI response contained no completion text"))
    }
}
