//! Optional speech-to-text capability.
//!
//! A host environment may or may not provide a recognizer. The controller
//! holds an `Option<Box<dyn SpeechRecognizer>>` and reports "unsupported"
//! when it is absent instead of failing.

use tokio::sync::mpsc;

use super::state::UiEvent;

/// Something reported by a running recognition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// A recognized utterance.
    Transcript(String),
    /// The recognizer failed; the session is over.
    Error(String),
    /// The session ended on its own.
    Ended,
}

/// Failure to start or stop recognition.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech recognition failed to start: {0}")]
    Start(String),
    #[error("speech recognition failed to stop: {0}")]
    Stop(String),
}

/// Channel through which a recognizer delivers [`SpeechEvent`]s.
#[derive(Debug, Clone)]
pub struct SpeechSink {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl SpeechSink {
    pub(crate) fn new(tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }

    /// Reports a recognized utterance.
    pub fn transcript(&self, text: impl Into<String>) {
        self.emit(SpeechEvent::Transcript(text.into()));
    }

    /// Reports a recognition error.
    pub fn error(&self, message: impl Into<String>) {
        self.emit(SpeechEvent::Error(message.into()));
    }

    /// Reports that the session ended.
    pub fn ended(&self) {
        self.emit(SpeechEvent::Ended);
    }

    fn emit(&self, event: SpeechEvent) {
        // The controller may already be gone; late events are dropped.
        let _ = self.tx.send(UiEvent::Speech(event));
    }
}

/// Contract implemented by speech recognition back ends.
pub trait SpeechRecognizer: Send {
    /// Starts a session that reports through `sink` until stopped or ended.
    fn start(&mut self, sink: SpeechSink) -> Result<(), SpeechError>;

    /// Stops the current session.
    fn stop(&mut self) -> Result<(), SpeechError>;
}
