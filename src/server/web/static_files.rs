use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path as FsPath};

use super::types::AppState;
use crate::assets::embedded::WebAssets;

pub async fn index(State(state): State<AppState>) -> Response {
    serve_asset(&state, "index.html").await
}

/// Any other GET: the asset if it exists, else the page itself
pub async fn static_handler(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    tracing::debug!("Static handler requested path: '{}'", path);
    let response = serve_asset(&state, &path).await;
    if response.status() == StatusCode::NOT_FOUND {
        return serve_asset(&state, "index.html").await;
    }
    response
}

async fn serve_asset(state: &AppState, path: &str) -> Response {
    let content = match &state.static_dir {
        Some(dir) => read_from_dir(dir, path).await,
        None => WebAssets::get(path).map(|file| file.data.into_owned()),
    };

    match content {
        Some(data) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            tracing::debug!("Found asset '{}', serving with mime: {}", path, mime);
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                Body::from(data),
            )
                .into_response()
        }
        None => {
            tracing::debug!("Asset '{}' not found", path);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

async fn read_from_dir(dir: &FsPath, path: &str) -> Option<Vec<u8>> {
    let relative = FsPath::new(path);
    // Only plain relative segments; no `..`, roots or prefixes
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    tokio::fs::read(dir.join(relative)).await.ok()
}
