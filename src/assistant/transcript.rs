use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{Message, CONVERSATION_WINDOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Honey,
}

/// One rendered chat bubble
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &TranscriptEntry {
        self.entries.push(TranscriptEntry {
            sender,
            text: text.into(),
            at: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Role-tagged history that goes upstream. Local command replies never land here.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent [`CONVERSATION_WINDOW`] messages, oldest first
    pub fn window(&self) -> Vec<Message> {
        let start = self.messages.len().saturating_sub(CONVERSATION_WINDOW);
        self.messages[start..].to_vec()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
