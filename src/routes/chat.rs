use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::SessionUser;
use crate::response::AppError;
use crate::services::chat_responder::{self, ChatContext};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    context: ChatContext,
}

#[derive(Serialize)]
pub struct ChatResponse {
    success: bool,
    response: String,
}

pub async fn chat(
    Extension(session): Extension<SessionUser>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if payload.message.is_empty() {
        return Err(AppError::validation("Message cannot be empty"));
    }

    tracing::debug!(
        user = %session.user_id,
        current_word = payload.context.current_word.as_deref().unwrap_or(""),
        "chat message"
    );

    Ok(Json(ChatResponse {
        success: true,
        response: chat_responder::respond(&payload.message, &payload.context),
    }))
}
