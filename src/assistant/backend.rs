use anyhow::Result;
use async_trait::async_trait;

use crate::core::{ChatResponse, Message};

/// Remote half of the chat path. `Err` means the round trip itself failed
/// (transport, undecodable body); error bodies come back as `Ok` with `error` set.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, messages: Vec<Message>) -> Result<ChatResponse>;
}
