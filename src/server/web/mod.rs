pub mod chat;
pub mod routes;
pub mod static_files;
pub mod types;

pub use routes::{build_router, start_web_server};
pub use types::AppState;
