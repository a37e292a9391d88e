pub mod client;
pub mod error;
pub mod prompt;

pub use client::{ChatCompletionClient, MODEL, TEMPERATURE};
pub use error::LlmError;
pub use prompt::SYSTEM_PROMPT;
