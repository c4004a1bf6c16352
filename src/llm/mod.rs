//! Chat-completion abstraction for the external LLM provider.
//!
//! The translation and detection clients depend on the [`ChatModel`] trait
//! instead of a concrete provider, which keeps prompt construction decoupled
//! from transport code and lets tests substitute a scripted model.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::AppError;

pub mod openai;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message of a chat-completion prompt.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Creates a system instruction message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Failure talking to the provider. Never shown to end users verbatim.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request to LLM provider failed: {0}")]
    Transport(String),
    #[error("LLM provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed LLM response: {0}")]
    MalformedResponse(String),
    #[error("LLM returned an empty reply")]
    EmptyReply,
}

/// Contract implemented by chat-completion providers.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends `messages` and returns the assistant reply content.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;

    /// Provider model identifier, for logs and health output.
    fn model_id(&self) -> &str;
}

/// Builds the configured chat model.
pub fn build_chat_model(cfg: &AppConfig) -> Result<Arc<dyn ChatModel>, AppError> {
    Ok(Arc::new(openai::OpenAiChatModel::new(cfg)?))
}
