//! JSON bodies exchanged between the browser view and the HTTP API.
//!
//! The same types back the server handlers and [`crate::ui::client`], so both
//! sides agree on field names by construction.

use serde::{Deserialize, Serialize};

/// Body of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Target language, matched against the catalog.
    pub language: String,
    /// Text to translate.
    pub text: String,
}

/// Successful reply of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

/// Body of `POST /detect-language`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectLanguageRequest {
    /// Candidate text; a missing or `null` value is treated as empty.
    #[serde(default)]
    pub text: Option<String>,
}

/// Successful reply of `POST /detect-language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectLanguageResponse {
    pub language: String,
}

/// The only failure shape any endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
