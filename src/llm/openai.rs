//! OpenAI-compatible `chat/completions` client.
//!
//! Requests are sent with temperature `0` so repeated inputs produce stable
//! output. There is no retry or rate limiting: one call, one outcome.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::llm::{ChatMessage, ChatModel, LlmError};

/// Sampling temperature used for every request.
pub const TEMPERATURE: f32 = 0.0;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Chat model backed by an OpenAI-compatible HTTP endpoint.
pub struct OpenAiChatModel {
    http: reqwest::Client,
    completions_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiChatModel {
    /// Creates a client from validated configuration.
    pub fn new(cfg: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|err| AppError::internal(format!("failed to create HTTP client: {err}")))?;

        Ok(Self::with_client(
            http,
            &cfg.openai_base_url,
            &cfg.openai_api_key,
            &cfg.model,
        ))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http,
            completions_url: completions_url(base_url),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages,
        };

        let response = self
            .http
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| LlmError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: truncate_chars(&text, MAX_ERROR_BODY_CHARS),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| LlmError::Transport(err.to_string()))?;
        let reply = parse_completion(&bytes)?;
        debug!(model = %self.model, reply_chars = reply.chars().count(), "chat completion finished");
        Ok(reply)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Extracts the first choice's message content from a completion body.
fn parse_completion(bytes: &[u8]) -> Result<String, LlmError> {
    let parsed: CompletionResponse = serde_json::from_slice(bytes)
        .map_err(|err| LlmError::MalformedResponse(err.to_string()))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("response has no choices".to_string()))?;
    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(LlmError::EmptyReply),
    }
}

fn truncate_chars(raw: &str, max: usize) -> String {
    match raw.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &raw[..idx]),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::{completions_url, parse_completion, truncate_chars, OpenAiChatModel};
    use crate::llm::{ChatMessage, ChatModel, LlmError};

    #[derive(Default)]
    struct Recorded {
        auth: Option<String>,
        body: Option<Value>,
    }

    async fn spawn_provider(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let app = Router::new()
            .route(
                "/v1/chat/completions",
                post(
                    move |State(rec): State<Arc<Mutex<Recorded>>>,
                          headers: HeaderMap,
                          Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            let mut rec = rec.lock().unwrap();
                            rec.auth = headers
                                .get("authorization")
                                .and_then(|v| v.to_str().ok())
                                .map(ToOwned::to_owned);
                            rec.body = Some(body);
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/v1"), recorded)
    }

    #[test]
    fn completions_url_handles_trailing_slash() {
        assert_eq!(
            completions_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn parse_completion_reads_first_choice() {
        let body = br#"{"choices":[{"message":{"role":"assistant","content":"Hola"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Hola");
    }

    #[test]
    fn parse_completion_rejects_missing_choices_and_blank_content() {
        assert!(matches!(
            parse_completion(br#"{"choices":[]}"#),
            Err(LlmError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion(br#"{"choices":[{"message":{"content":null}}]}"#),
            Err(LlmError::EmptyReply)
        ));
        assert!(matches!(
            parse_completion(b"not json"),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé...");
        assert_eq!(truncate_chars("hi", 5), "hi");
    }

    #[tokio::test]
    async fn sends_model_temperature_and_bearer_token() {
        let (base_url, recorded) = spawn_provider(
            StatusCode::OK,
            json!({"choices":[{"message":{"role":"assistant","content":"Bonjour"}}]}),
        )
        .await;
        let model =
            OpenAiChatModel::with_client(reqwest::Client::new(), &base_url, "sk-test", "gpt-test");

        let reply = model
            .complete(&[ChatMessage::system("sys"), ChatMessage::user("Hello")])
            .await
            .unwrap();
        assert_eq!(reply, "Bonjour");

        let rec = recorded.lock().unwrap();
        assert_eq!(rec.auth.as_deref(), Some("Bearer sk-test"));
        let body = rec.body.as_ref().unwrap();
        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hello");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let (base_url, _) = spawn_provider(
            StatusCode::UNAUTHORIZED,
            json!({"error":{"message":"bad key"}}),
        )
        .await;
        let model =
            OpenAiChatModel::with_client(reqwest::Client::new(), &base_url, "sk-bad", "gpt-test");

        let err = model.complete(&[ChatMessage::user("Hello")]).await.unwrap_err();
        assert!(matches!(err, LlmError::Status { status: 401, .. }));
    }
}
