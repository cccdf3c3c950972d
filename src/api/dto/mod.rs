//! Data Transfer Objects for REST request/response serialization.
//!
//! The robot endpoints accept and return the domain types directly
//! ([`crate::domain::RobotAction`], [`crate::domain::ActionResult`],
//! [`crate::domain::RobotStatus`]); only the conversational endpoint
//! needs its own envelope types.

pub mod chat_dto;

pub use chat_dto::{
    AssistantMessage, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ModelInfo, ModelListResponse, TokenUsage,
};
