use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::assistant::ChatBackend;
use crate::core::{ChatRequest, ChatResponse, Config, Message};

/// Talks to a running `honey serve`
#[derive(Debug, Clone)]
pub struct HoneyClient {
    base_url: String,
    client: Client,
}

impl HoneyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.server_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if server is running by fetching the page
    pub async fn is_server_running(&self) -> bool {
        self.client
            .get(format!("{}/", self.base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .is_ok()
    }

    /// POST the window to `/api/chat`. The body is decoded whatever the
    /// status, since error responses carry `{error, details}`.
    pub async fn chat(&self, messages: Vec<Message>) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);
        tracing::debug!("POST {} with {} messages", url, messages.len());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { messages })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("POST /api/chat response status: {}", status);

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse chat response ({}): {}", status, e))
    }
}

#[async_trait]
impl ChatBackend for HoneyClient {
    async fn send(&self, messages: Vec<Message>) -> Result<ChatResponse> {
        self.chat(messages).await
    }
}
