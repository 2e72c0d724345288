//! Translation provider: the `Translator` capability and its OpenAI chat
//! completions implementation.

use crate::config::Config;
use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Something that turns a translation prompt into translated text.
///
/// The synchronizer depends only on this, so tests can plug in a
/// deterministic fake instead of the HTTP client.
#[allow(async_fn_in_trait)]
pub trait Translator {
    async fn translate(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    n: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Translator backed by the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    organization: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiTranslator {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.openai_api_url.clone(),
            api_key: config.openai_api_key.clone(),
            organization: config.openai_organization.clone(),
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
            max_tokens: config.openai_max_tokens,
        }
    }

    fn build_request<'a>(&'a self, prompt: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            n: 1,
        }
    }
}

impl Translator for OpenAiTranslator {
    async fn translate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = self.build_request(prompt);

        debug!("Sending translation request to {}", self.api_url);
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("OpenAI-Organization", &self.organization)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Status { status, body });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}
