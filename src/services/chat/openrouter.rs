use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use super::{ChatProvider, Message};
use crate::errors::ChatError;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub struct OpenRouterProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<String, ChatError> {
        if self.api_key.is_empty() {
            return Err(ChatError::MissingCredentials);
        }

        let mut chat_messages = vec![json!({
            "role": "system",
            "content": system_prompt,
        })];

        for msg in messages {
            chat_messages.push(json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        let body = json!({
            "model": self.model,
            "messages": chat_messages,
            "temperature": 0.7,
            "max_tokens": 500,
        });

        let resp = self
            .client
            .post(OPENROUTER_URL)
            .bearer_auth(&self.api_key)
            .header("X-Title", "Learning Booking System")
            .json(&body)
            .send()
            .await
            .context("failed to call OpenRouter API")?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ChatError::Unauthorized);
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse OpenRouter response")?;

        if !status.is_success() {
            return Err(anyhow::anyhow!("OpenRouter API error ({}): {}", status, data).into());
        }

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing content in OpenRouter response").into())
    }
}
