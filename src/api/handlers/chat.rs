//! Conversational handlers: chat completions and the model catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    AssistantMessage, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ModelInfo,
    ModelListResponse, TokenUsage,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// Model id this service answers as.
const MODEL_ID: &str = "robot-api";

/// `POST /v1/chat/completions` — Interpret a natural-language message.
///
/// Only the last message's content is interpreted. A dispatched action
/// runs to completion before the response is produced, so the reply
/// reflects the final execution outcome.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when the message list is
/// empty.
#[utoipa::path(
    post,
    path = "/v1/chat/completions",
    tag = "Chat",
    summary = "Create a chat completion",
    description = "Maps the last user message to a canned reply or a dispatched robot action and wraps the outcome in a chat-completion envelope.",
    request_body = ChatCompletionRequest,
    responses(
        (status = 200, description = "Completion with a single choice", body = ChatCompletionResponse),
        (status = 400, description = "Empty message list", body = ErrorResponse),
    )
)]
pub async fn create_chat_completion(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let Some(last) = request.messages.last() else {
        return Err(GatewayError::InvalidRequest(
            "messages must not be empty".to_string(),
        ));
    };

    let reply = state.chat_service.respond(&last.content).await;

    let prompt_tokens = whitespace_tokens(&last.content);
    let completion_tokens = whitespace_tokens(&reply.content);

    let response = ChatCompletionResponse {
        id: format!("chatcmpl-{}", uuid::Uuid::new_v4().simple()),
        object: "chat.completion".to_string(),
        created: Utc::now().timestamp(),
        model: request.model,
        usage: TokenUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        },
        choices: vec![ChatChoice {
            message: AssistantMessage {
                role: "assistant".to_string(),
                content: reply.content,
                show_screenshot: reply.show_stream,
                screenshot_url: reply.stream_url,
            },
            finish_reason: "stop".to_string(),
            index: 0,
        }],
    };

    Ok(Json(response))
}

/// `GET /v1/models` — Static single-entry model catalog.
#[utoipa::path(
    get,
    path = "/v1/models",
    tag = "Chat",
    summary = "List available models",
    description = "Returns the single callable model this service exposes.",
    responses(
        (status = 200, description = "Model catalog", body = ModelListResponse),
    )
)]
pub async fn list_models() -> impl IntoResponse {
    Json(ModelListResponse {
        data: vec![ModelInfo {
            id: MODEL_ID.to_string(),
            object: "model".to_string(),
            owned_by: "lmms-lab".to_string(),
            permission: Vec::new(),
        }],
    })
}

/// Naive word count standing in for a tokenizer.
fn whitespace_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Chat routes mounted under `/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat/completions", post(create_chat_completion))
        .route("/models", get(list_models))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_tokens_counts_words() {
        assert_eq!(whitespace_tokens("사과를 테이블 위로 옮겨줘"), 4);
        assert_eq!(whitespace_tokens(""), 0);
        assert_eq!(whitespace_tokens("   spaced   out   "), 2);
    }
}
