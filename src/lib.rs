//! Text translator service backed by an OpenAI-compatible chat completion API.
//!
//! The server exposes `POST /translate` and `POST /detect-language` next to
//! the single-page view; [`ui`] holds the view's session model.

pub mod api;
pub mod catalog;
pub mod config;
pub mod detection;
pub mod error;
pub mod llm;
pub mod protocol;
pub mod translation;
pub mod ui;
