//! HTTP API surface: the translate and detect-language endpoints plus the
//! page, health, and catalog routes the browser view relies on.
//!
//! This module owns request parsing and validation while delegating all
//! language work to the LLM-backed clients.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use crate::catalog::{find_language, LanguageOption, LANGUAGES};
use crate::detection::DetectionClient;
use crate::error::AppError;
use crate::llm::ChatModel;
use crate::protocol::{
    DetectLanguageRequest, DetectLanguageResponse, TranslateRequest, TranslateResponse,
};
use crate::translation::TranslationClient;

/// Human-readable service name returned by the health endpoint.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Service version string returned by the health endpoint.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared state injected into all route handlers.
pub struct AppState {
    /// Model identifier reported by `/health`.
    pub model_id: String,
    pub translator: TranslationClient,
    pub detector: DetectionClient,
}

impl AppState {
    /// Constructs handler state around one shared chat model.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model_id: model.model_id().to_string(),
            translator: TranslationClient::new(model.clone()),
            detector: DetectionClient::new(model),
        }
    }
}

/// Builds the Axum router for all public endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/translate", post(translate))
        .route("/detect-language", post(detect_language))
        .with_state(state)
}

/// Serves the single-page view (`GET /`).
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Status endpoint (`GET /health`).
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": APP_NAME,
        "version": APP_VERSION,
        "model": state.model_id,
    }))
}

/// Lists the language catalog (`GET /languages`).
pub async fn languages() -> Json<&'static [LanguageOption]> {
    Json(&LANGUAGES[..])
}

/// Translates text into a catalog language (`POST /translate`).
pub async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let Json(req) = payload.map_err(reject_body)?;

    let language = find_language(&req.language).ok_or_else(|| {
        AppError::invalid_request(format!("unsupported language={:?}", req.language))
    })?;
    if req.text.trim().is_empty() {
        return Err(AppError::invalid_request("text must not be empty"));
    }

    info!(
        language = language.code,
        text_chars = req.text.chars().count(),
        "translating"
    );

    match state.translator.translate(language.code, &req.text).await {
        Ok(translation) => Ok(Json(TranslateResponse { translation })),
        Err(err) => {
            error!(error = %err, language = language.code, "translation failed");
            Err(AppError::Translation)
        }
    }
}

/// Classifies the language of a text (`POST /detect-language`).
pub async fn detect_language(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DetectLanguageRequest>, JsonRejection>,
) -> Result<Json<DetectLanguageResponse>, AppError> {
    let Json(req) = payload.map_err(reject_body)?;
    let text = req.text.unwrap_or_default();

    match state.detector.detect(&text).await {
        Ok(language) => {
            info!(language = %language, text_chars = text.chars().count(), "detected language");
            Ok(Json(DetectLanguageResponse { language }))
        }
        Err(err) => {
            error!(error = %err, "language detection failed");
            Err(AppError::Detection)
        }
    }
}

fn reject_body(rejection: JsonRejection) -> AppError {
    AppError::invalid_request(format!("invalid JSON body: {}", rejection.body_text()))
}
