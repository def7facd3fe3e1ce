pub mod error;
pub mod types;
pub mod util;

pub use error::{AiError, Result};
pub use util::{parse_json, strip_code_blocks, truncate_to_char_boundary};

use tracing::debug;
use types::{ChatRequest, ChatResponse, ResponseFormat, WireMessage};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions client. One blocking round trip per call; no
/// retry, no backoff, no streaming.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: String,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            http: reqwest::Client::new(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| AiError::Api {
            status: 0,
            message: "OPENAI_API_KEY environment variable not set".to_string(),
        })?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Chat completion in JSON-object response mode. Returns the raw
    /// completion text; parse it with [`parse_json`].
    pub async fn chat_json(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        self.chat(system, user, temperature, Some(ResponseFormat::json_object()))
            .await
    }

    /// Plain-text chat completion.
    pub async fn chat_text(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        self.chat(system, user, temperature, None).await
    }

    async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        response_format: Option<ResponseFormat>,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![WireMessage::system(system), WireMessage::user(user)],
            temperature,
            response_format,
        };

        debug!(model = %request.model, "OpenAI chat request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AiError::NoContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_new() {
        let ai = OpenAi::new("sk-test", "gpt-4o");
        assert_eq!(ai.model(), "gpt-4o");
        assert_eq!(ai.base_url, OPENAI_API_URL);
    }

    #[test]
    fn test_openai_with_base_url() {
        let ai = OpenAi::new("sk-test", "gpt-4o").with_base_url("https://custom.api.com/v1");
        assert_eq!(ai.base_url, "https://custom.api.com/v1");
    }
}
