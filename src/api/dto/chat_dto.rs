//! Chat-completion envelope DTOs.
//!
//! The conversational endpoint mimics a chat-completion API so
//! off-the-shelf clients can talk to the robot: the request carries
//! role/content pairs and a model id, the response echoes the model
//! and wraps the interpreter's reply in a single choice.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One role/content message pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    /// Message author role (`system`, `user`, `assistant`).
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Request body for `POST /v1/chat/completions`.
///
/// Only the last message's content is interpreted; the generation
/// knobs are accepted for wire compatibility and ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatCompletionRequest {
    /// Model identifier, echoed back in the response.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature (ignored).
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Maximum completion tokens (ignored).
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Streaming flag (ignored, responses are always unary).
    #[serde(default)]
    pub stream: Option<bool>,
}

/// Naive token usage: whitespace token counts, not a real tokenizer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenUsage {
    /// Whitespace tokens in the interpreted message.
    pub prompt_tokens: usize,
    /// Whitespace tokens in the reply.
    pub completion_tokens: usize,
    /// Sum of the two.
    pub total_tokens: usize,
}

/// Assistant message inside a choice, augmented with the stream
/// reference when a location query fired.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssistantMessage {
    /// Always `assistant`.
    pub role: String,
    /// Reply text.
    pub content: String,
    /// Whether the client should surface the live stream.
    pub show_screenshot: bool,
    /// Live stream locator, present when `show_screenshot` is set.
    pub screenshot_url: Option<String>,
}

/// Single completion choice.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatChoice {
    /// The assistant's message.
    pub message: AssistantMessage,
    /// Always `stop`.
    pub finish_reason: String,
    /// Choice index, always 0.
    pub index: u32,
}

/// Response body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatCompletionResponse {
    /// Server-generated completion id.
    pub id: String,
    /// Always `chat.completion`.
    pub object: String,
    /// Unix timestamp of creation.
    pub created: i64,
    /// Model id echoed from the request.
    pub model: String,
    /// Naive token usage.
    pub usage: TokenUsage,
    /// Exactly one choice.
    pub choices: Vec<ChatChoice>,
}

/// Entry in the model catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Always `model`.
    pub object: String,
    /// Owning organization.
    pub owned_by: String,
    /// Permission list (always empty).
    pub permission: Vec<String>,
}

/// Response body for `GET /v1/models`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelListResponse {
    /// Available models.
    pub data: Vec<ModelInfo>,
}
