//! Session model of the translator view.
//!
//! The browser page served at `/` mirrors this model; keeping the logic here
//! lets every transition be exercised without a browser.

pub mod client;
pub mod controller;
pub mod speech;
pub mod state;
pub mod timer;

pub use client::{ApiError, HttpTranslatorApi, TranslatorApi};
pub use controller::{TranslatorController, UiSettings};
pub use speech::{SpeechError, SpeechEvent, SpeechRecognizer, SpeechSink};
pub use state::{Effect, Notification, NotificationKind, Theme, UiAction, UiEvent, UiState};
