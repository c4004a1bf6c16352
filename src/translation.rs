//! Translation client: fixed prompt template in front of a [`ChatModel`].

use std::sync::Arc;

use crate::llm::{ChatMessage, ChatModel, LlmError};

/// Builds the two-message translation prompt.
pub fn translation_prompt(language: &str, text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "Translate the following from English into {language}"
        )),
        ChatMessage::user(text),
    ]
}

/// Sends text to the LLM for translation into a target language.
#[derive(Clone)]
pub struct TranslationClient {
    model: Arc<dyn ChatModel>,
}

impl TranslationClient {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Translates `text` into `language` and returns the model's reply.
    ///
    /// `language` is interpolated into the prompt as-is; callers pass a
    /// catalog code, never raw user input.
    pub async fn translate(&self, language: &str, text: &str) -> Result<String, LlmError> {
        let reply = self
            .model
            .complete(&translation_prompt(language, text))
            .await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(LlmError::EmptyReply);
        }
        Ok(reply.to_string())
    }
}
