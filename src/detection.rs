//! Language detection client.
//!
//! The model answers in free text; the value returned here is normalised but
//! still untrusted and must be matched against [`crate::catalog`] before use.

use std::sync::Arc;

use crate::llm::{ChatMessage, ChatModel, LlmError};

/// Answer for input too short to classify.
pub const DEFAULT_LANGUAGE: &str = "English";
/// Minimum trimmed length (in characters) worth sending to the model.
pub const MIN_DETECTABLE_CHARS: usize = 2;

const DETECTION_INSTRUCTION: &str = "You are a language detection system. \
Your task is to identify the language of the user's text. \
Return ONLY the language name in English (e.g. \"English\", \"Spanish\", \"Urdu\").";

/// Builds the two-message classification prompt.
pub fn detection_prompt(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(DETECTION_INSTRUCTION),
        ChatMessage::user(text),
    ]
}

/// Returns true when `text` is too short to be worth classifying.
pub fn is_too_short(text: &str) -> bool {
    text.trim().chars().count() < MIN_DETECTABLE_CHARS
}

/// Strips decoration models commonly wrap a one-word answer in.
pub fn normalize_language_name(raw: &str) -> String {
    let is_wrapper = |c: char| c == '"' || c == '\'' || c == '`' || c.is_whitespace();
    raw.trim_matches(is_wrapper)
        .trim_end_matches('.')
        .trim_matches(is_wrapper)
        .to_string()
}

/// Asks the LLM which language a text is written in.
#[derive(Clone)]
pub struct DetectionClient {
    model: Arc<dyn ChatModel>,
}

impl DetectionClient {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Returns a best-guess language name, or [`DEFAULT_LANGUAGE`] without
    /// calling the model when the input is near-empty.
    pub async fn detect(&self, text: &str) -> Result<String, LlmError> {
        if is_too_short(text) {
            return Ok(DEFAULT_LANGUAGE.to_string());
        }

        let reply = self.model.complete(&detection_prompt(text)).await?;
        let language = normalize_language_name(&reply);
        if language.is_empty() {
            return Err(LlmError::EmptyReply);
        }
        Ok(language)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::{is_too_short, normalize_language_name, DetectionClient};
    use crate::llm::{ChatMessage, ChatModel, LlmError};

    struct CountingModel {
        reply: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatModel for CountingModel {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }

        fn model_id(&self) -> &str {
            "counting"
        }
    }

    fn client(reply: &'static str) -> (DetectionClient, Arc<CountingModel>) {
        let model = Arc::new(CountingModel {
            reply,
            calls: AtomicUsize::new(0),
        });
        (DetectionClient::new(model.clone()), model)
    }

    #[test]
    fn short_input_counts_characters_not_bytes() {
        assert!(is_too_short(""));
        assert!(is_too_short("   a  "));
        assert!(is_too_short("é"));
        assert!(!is_too_short("日本"));
    }

    #[test]
    fn normalization_strips_quotes_and_period() {
        assert_eq!(normalize_language_name(" \"French.\" "), "French");
        assert_eq!(normalize_language_name("Spanish.\n"), "Spanish");
        assert_eq!(normalize_language_name("'Urdu'"), "Urdu");
    }

    #[tokio::test]
    async fn near_empty_input_skips_the_model() {
        let (detector, model) = client("French");
        for text in ["", " ", "a", " b "] {
            assert_eq!(detector.detect(text).await.unwrap(), "English");
        }
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn longer_input_asks_the_model() {
        let (detector, model) = client("French\n");
        assert_eq!(
            detector.detect("Bonjour tout le monde").await.unwrap(),
            "French"
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let (detector, _) = client(" \"\" ");
        assert!(matches!(
            detector.detect("hola amigos").await,
            Err(LlmError::EmptyReply)
        ));
    }
}
