pub mod http;
pub mod input;
pub mod repl;

pub use http::HoneyClient;
pub use repl::{run_repl, TerminalFrontend};
