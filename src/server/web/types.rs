use std::path::PathBuf;

use crate::llm::ChatCompletionClient;

#[derive(Clone)]
pub struct AppState {
    pub llm: ChatCompletionClient,
    /// Serve the page from disk instead of the embedded copy
    pub static_dir: Option<PathBuf>,
}
