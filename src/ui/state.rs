//! Translator view state and its transition function.
//!
//! [`UiState::apply`] performs no I/O: it mutates the state and returns the
//! [`Effect`]s the caller must carry out (timers, network calls, speech
//! recognition). The controller feeds the outcomes back as further events.

use crate::catalog::{default_source, default_target, find_language, LanguageOption};

use super::speech::SpeechEvent;

pub const SPEECH_UNSUPPORTED_MESSAGE: &str =
    "Speech recognition is not supported in this environment.";

/// Colour scheme of the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A transient, auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    EditText(String),
    SelectSource(String),
    SelectTarget(String),
    SwapLanguages,
    ToggleTheme,
    ToggleRecording,
    Translate,
    DismissNotification,
}

/// Every input the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Action(UiAction),
    /// The debounce window for `text` elapsed.
    DetectionDue { text: String },
    DetectionFinished {
        seq: u64,
        outcome: Result<String, String>,
    },
    TranslationFinished {
        seq: u64,
        outcome: Result<String, String>,
    },
    Speech(SpeechEvent),
    /// The recognizer could not be started.
    RecordingFailed(String),
    NotificationExpired { id: u64 },
}

impl From<UiAction> for UiEvent {
    fn from(action: UiAction) -> Self {
        Self::Action(action)
    }
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Restart the debounce timer for `text`.
    ScheduleDetection { text: String },
    CancelDetection,
    Detect { seq: u64, text: String },
    Translate {
        seq: u64,
        language: &'static str,
        text: String,
    },
    StartRecording,
    StopRecording,
    ScheduleDismiss { id: u64 },
}

/// Everything the translator view displays, owned by a single controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
    pub source: &'static LanguageOption,
    pub target: &'static LanguageOption,
    pub text: String,
    /// Last successful translation.
    pub translation: Option<String>,
    pub loading: bool,
    pub recording: bool,
    pub speech_supported: bool,
    /// Text most recently sent for detection.
    pub last_detected: Option<String>,
    pub notification: Option<Notification>,
    detection_seq: u64,
    translation_seq: u64,
    next_notification_id: u64,
}

impl UiState {
    pub fn new(speech_supported: bool) -> Self {
        Self {
            theme: Theme::default(),
            source: default_source(),
            target: default_target(),
            text: String::new(),
            translation: None,
            loading: false,
            recording: false,
            speech_supported,
            last_detected: None,
            notification: None,
            detection_seq: 0,
            translation_seq: 0,
            next_notification_id: 0,
        }
    }

    /// Whether the translate action is currently enabled.
    pub fn can_translate(&self) -> bool {
        !self.loading && !self.text.trim().is_empty()
    }

    /// Applies one event and returns the effects it requires.
    pub fn apply(&mut self, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::Action(action) => self.apply_action(action),
            UiEvent::DetectionDue { text } => self.on_detection_due(text),
            UiEvent::DetectionFinished { seq, outcome } => self.on_detection_finished(seq, outcome),
            UiEvent::TranslationFinished { seq, outcome } => {
                self.on_translation_finished(seq, outcome)
            }
            UiEvent::Speech(event) => self.on_speech(event),
            UiEvent::RecordingFailed(message) => {
                self.recording = false;
                self.notify(NotificationKind::Error, message)
            }
            UiEvent::NotificationExpired { id } => {
                if self.notification.as_ref().is_some_and(|n| n.id == id) {
                    self.notification = None;
                }
                Vec::new()
            }
        }
    }

    fn apply_action(&mut self, action: UiAction) -> Vec<Effect> {
        match action {
            UiAction::EditText(text) => self.on_text_changed(text),
            UiAction::SelectSource(code) => {
                if let Some(language) = find_language(&code) {
                    self.source = language;
                }
                Vec::new()
            }
            UiAction::SelectTarget(code) => {
                if let Some(language) = find_language(&code) {
                    self.target = language;
                }
                Vec::new()
            }
            UiAction::SwapLanguages => {
                std::mem::swap(&mut self.source, &mut self.target);
                Vec::new()
            }
            UiAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                Vec::new()
            }
            UiAction::ToggleRecording => self.on_toggle_recording(),
            UiAction::Translate => self.on_translate(),
            UiAction::DismissNotification => {
                self.notification = None;
                Vec::new()
            }
        }
    }

    fn on_text_changed(&mut self, text: String) -> Vec<Effect> {
        self.text = text;

        if self.text.trim().is_empty() {
            self.source = default_source();
            self.last_detected = None;
            // Results of requests issued for the old text no longer apply.
            self.detection_seq += 1;
            if self.loading {
                self.loading = false;
                self.translation_seq += 1;
            }
            return vec![Effect::CancelDetection];
        }

        if self.last_detected.as_deref() == Some(self.text.as_str()) {
            return vec![Effect::CancelDetection];
        }

        vec![Effect::ScheduleDetection {
            text: self.text.clone(),
        }]
    }

    fn on_detection_due(&mut self, text: String) -> Vec<Effect> {
        if text != self.text
            || text.trim().is_empty()
            || self.last_detected.as_deref() == Some(text.as_str())
        {
            return Vec::new();
        }

        self.detection_seq += 1;
        self.last_detected = Some(text.clone());
        vec![Effect::Detect {
            seq: self.detection_seq,
            text,
        }]
    }

    fn on_detection_finished(&mut self, seq: u64, outcome: Result<String, String>) -> Vec<Effect> {
        if seq != self.detection_seq {
            return Vec::new();
        }

        match outcome {
            Ok(name) => {
                // Unknown names leave the selection unchanged.
                if let Some(language) = find_language(&name) {
                    self.source = language;
                }
                Vec::new()
            }
            Err(message) => self.notify(NotificationKind::Error, message),
        }
    }

    fn on_translate(&mut self) -> Vec<Effect> {
        if !self.can_translate() {
            return Vec::new();
        }

        self.loading = true;
        self.translation_seq += 1;
        vec![Effect::Translate {
            seq: self.translation_seq,
            language: self.target.code,
            text: self.text.clone(),
        }]
    }

    fn on_translation_finished(
        &mut self,
        seq: u64,
        outcome: Result<String, String>,
    ) -> Vec<Effect> {
        if seq != self.translation_seq {
            return Vec::new();
        }

        self.loading = false;
        match outcome {
            Ok(translation) => {
                self.translation = Some(translation);
                Vec::new()
            }
            Err(message) => self.notify(NotificationKind::Error, message),
        }
    }

    fn on_toggle_recording(&mut self) -> Vec<Effect> {
        if !self.speech_supported {
            return self.notify(NotificationKind::Info, SPEECH_UNSUPPORTED_MESSAGE);
        }

        if self.recording {
            self.recording = false;
            vec![Effect::StopRecording]
        } else {
            self.recording = true;
            vec![Effect::StartRecording]
        }
    }

    fn on_speech(&mut self, event: SpeechEvent) -> Vec<Effect> {
        match event {
            SpeechEvent::Transcript(transcript) => {
                let transcript = transcript.trim();
                if transcript.is_empty() {
                    return Vec::new();
                }
                let text = if self.text.is_empty() {
                    transcript.to_string()
                } else {
                    format!("{} {}", self.text, transcript)
                };
                self.on_text_changed(text)
            }
            SpeechEvent::Error(message) => {
                self.recording = false;
                self.notify(
                    NotificationKind::Error,
                    format!("Speech recognition error: {message}"),
                )
            }
            SpeechEvent::Ended => {
                self.recording = false;
                Vec::new()
            }
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Vec<Effect> {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notification = Some(Notification {
            id,
            kind,
            message: message.into(),
        });
        vec![Effect::ScheduleDismiss { id }]
    }
}
