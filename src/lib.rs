// Honey library
// Chat proxy for a hosted LLM plus the study-buddy session that talks to it

pub mod assets;
pub mod assistant;
pub mod cli;
pub mod client;
pub mod core;
pub mod llm;
pub mod server;

// Re-export commonly used types
pub use assistant::{Assistant, SessionHandle};
pub use client::HoneyClient;
pub use self::core::{ChatRequest, ChatResponse, Config, Message, Role};

// Error handling
pub use anyhow::{Error, Result};
