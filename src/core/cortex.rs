use crate::core::state::ScoutConfig;
use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Thin chat-completions client. One prompt in, one reply out.
pub struct Cortex {
    pub api_key: String,
    pub api_base: String,
    pub client: reqwest::Client,
    pub model: String,
    pub temperature: f32,
}

impl Cortex {
    /// Reads the key (and optional base URL override) from the environment.
    pub fn from_env(config: &ScoutConfig) -> Result<Self> {
        let api_key = env::var(API_KEY_VAR)
            .with_context(|| format!("{} not found in .env or environment", API_KEY_VAR))?;
        let api_base = env::var(BASE_URL_VAR).unwrap_or_else(|_| config.api_base.clone());
        Self::new(config, api_key, api_base)
    }

    pub fn new(config: &ScoutConfig, api_key: String, api_base: String) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Sends `prompt` as the single user message and returns the trimmed reply.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        let payload = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature
        });

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "sending chat completion");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            return Err(anyhow!("Chat completion failed. Status: {}, Body: {}", status, err_text));
        }

        let body: Value = res.json().await?;
        let text = extract_text(&body).context("No message content in chat completion response")?;
        tracing::debug!(reply_chars = text.len(), "chat completion received");
        Ok(text.trim().to_string())
    }
}

fn extract_text(body: &Value) -> Option<String> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}
