use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::AppState;
use crate::core::{ChatRequest, ChatResponse};
use crate::llm::LlmError;

/// `POST /api/chat`: forward the caller's messages upstream and relay the reply.
/// A missing or unreadable body counts as an empty conversation.
pub async fn chat(State(state): State<AppState>, body: Option<Json<ChatRequest>>) -> Response {
    let messages = body.map(|Json(req)| req.messages).unwrap_or_default();
    tracing::debug!("POST /api/chat with {} messages", messages.len());

    match state.llm.complete(messages).await {
        Ok(reply) => Json(ChatResponse::reply(reply)).into_response(),
        Err(e) => e.into_response(),
    }
}

impl IntoResponse for LlmError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let body = match self {
            LlmError::MissingApiKey => {
                tracing::error!("Chat request rejected: {}", message);
                ChatResponse::error(message, None)
            }
            LlmError::Upstream { details, .. } => {
                ChatResponse::error("Groq API error", Some(details))
            }
            LlmError::Network(_) | LlmError::InvalidResponse(_) => {
                tracing::error!("Server error: {}", message);
                ChatResponse::error("Server error", None)
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
