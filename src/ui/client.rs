//! Client side of the translate and detect-language endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::protocol::{
    DetectLanguageRequest, DetectLanguageResponse, ErrorBody, TranslateRequest, TranslateResponse,
};

/// Failure of an endpoint call. The `Display` text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    /// The server answered with an `{error}` payload.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response from server (HTTP {status})")]
    Malformed { status: u16 },
}

/// Operations the translator view needs from the backend.
#[async_trait]
pub trait TranslatorApi: Send + Sync {
    async fn translate(&self, language: &str, text: &str) -> Result<String, ApiError>;

    async fn detect_language(&self, text: &str) -> Result<String, ApiError>;
}

/// [`TranslatorApi`] over HTTP against a running server.
#[derive(Debug, Clone)]
pub struct HttpTranslatorApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTranslatorApi {
    /// Creates a client for a server rooted at `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        decode_reply(status, &bytes)
    }
}

/// Maps a raw reply to the success type or an [`ApiError`].
fn decode_reply<R: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<R, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_slice(bytes).map_err(|_| ApiError::Malformed { status });
    }
    match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(body) => Err(ApiError::Server {
            status,
            message: body.error,
        }),
        Err(_) => Err(ApiError::Malformed { status }),
    }
}

#[async_trait]
impl TranslatorApi for HttpTranslatorApi {
    async fn translate(&self, language: &str, text: &str) -> Result<String, ApiError> {
        let req = TranslateRequest {
            language: language.to_string(),
            text: text.to_string(),
        };
        let res: TranslateResponse = self.post("/translate", &req).await?;
        if res.translation.trim().is_empty() {
            return Err(ApiError::Malformed { status: 200 });
        }
        Ok(res.translation)
    }

    async fn detect_language(&self, text: &str) -> Result<String, ApiError> {
        let req = DetectLanguageRequest {
            text: Some(text.to_string()),
        };
        let res: DetectLanguageResponse = self.post("/detect-language", &req).await?;
        Ok(res.language)
    }
}
