use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::{
    chat::chat,
    static_files::{index, static_handler},
    types::AppState,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/*path", get(static_handler))
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

pub async fn start_web_server(host: &str, port: u16, state: AppState) -> Result<()> {
    if !state.llm.has_api_key() {
        tracing::error!(
            "{} is not set; /api/chat will answer with an error until it is configured",
            crate::core::config::API_KEY_ENV
        );
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Honey server running on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
