//! OpenAI-compatible chat-completion client (Groq by default)

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::LlmError;
use super::prompt::SYSTEM_PROMPT;
use crate::core::config::ProviderConfig;
use crate::core::Message;

pub const MODEL: &str = "llama-3.1-8b-instant";
pub const TEMPERATURE: f32 = 0.7;

/// Reply used when upstream succeeds but sends no content
pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I got confused there.";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(provider: &ProviderConfig, api_key: Option<String>) -> Self {
        Self::new(provider.base_url.clone(), api_key)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send `messages` upstream behind the system prompt and return the top reply.
    pub async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let mut forwarded = Vec::with_capacity(messages.len() + 1);
        forwarded.push(Message::system(SYSTEM_PROMPT));
        forwarded.extend(messages);

        let request = CompletionRequest {
            model: MODEL,
            messages: forwarded,
            temperature: TEMPERATURE,
        };

        tracing::debug!(
            "POST {} with {} messages",
            self.base_url,
            request.messages.len()
        );

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::from_network_error)?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Upstream API error {}: {}", status, details);
            return Err(LlmError::Upstream { status, details });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(top_reply(body))
    }
}

fn top_reply(body: CompletionResponse) -> String {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string())
}
