//! Event loop that owns [`UiState`] and carries out its effects.
//!
//! User actions, timer fires, network completions, and speech events all
//! arrive on one channel and are applied in order by a single task, so the
//! state never has more than one writer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::client::TranslatorApi;
use super::speech::{SpeechError, SpeechRecognizer, SpeechSink};
use super::state::{Effect, UiAction, UiEvent, UiState};
use super::timer::{schedule, Debouncer, TimerHandle};

/// Quiescence window before the input is sent for language detection.
pub const DEFAULT_DETECTION_DEBOUNCE: Duration = Duration::from_secs(2);
/// How long a notification stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Timing knobs for the controller.
#[derive(Debug, Clone, Copy)]
pub struct UiSettings {
    pub detection_debounce: Duration,
    pub notification_ttl: Duration,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            detection_debounce: DEFAULT_DETECTION_DEBOUNCE,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

/// Handle to a running translator view session.
///
/// Dropping the handle tears the session down: pending timers are cancelled
/// and an active recognition session is stopped.
pub struct TranslatorController {
    events: mpsc::UnboundedSender<UiEvent>,
    state: watch::Receiver<UiState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TranslatorController {
    /// Starts the event loop on the current Tokio runtime.
    pub fn spawn(
        api: Arc<dyn TranslatorApi>,
        speech: Option<Box<dyn SpeechRecognizer>>,
        settings: UiSettings,
    ) -> Self {
        let initial = UiState::new(speech.is_some());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let event_loop = EventLoop {
            state: initial,
            api,
            speech,
            settings,
            events: events_tx.clone(),
            published: state_tx,
            detection: Debouncer::new(settings.detection_debounce),
            dismiss: None,
        };
        let task = tokio::spawn(event_loop.run(events_rx, shutdown_rx));

        Self {
            events: events_tx,
            state: state_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Queues a user action.
    pub fn dispatch(&self, action: UiAction) {
        if self.events.send(action.into()).is_err() {
            warn!("translator session is closed; dropping action");
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Stops the event loop and waits for teardown to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TranslatorController {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

struct EventLoop {
    state: UiState,
    api: Arc<dyn TranslatorApi>,
    speech: Option<Box<dyn SpeechRecognizer>>,
    settings: UiSettings,
    events: mpsc::UnboundedSender<UiEvent>,
    published: watch::Sender<UiState>,
    detection: Debouncer,
    dismiss: Option<TimerHandle>,
}

impl EventLoop {
    async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<UiEvent>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
            }
        }
        self.teardown();
    }

    fn handle(&mut self, event: UiEvent) {
        debug!(?event, "applying ui event");
        for effect in self.state.apply(event) {
            self.perform(effect);
        }
        self.published.send_replace(self.state.clone());
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleDetection { text } => {
                let events = self.events.clone();
                self.detection.restart(move || {
                    let _ = events.send(UiEvent::DetectionDue { text });
                });
            }
            Effect::CancelDetection => self.detection.cancel(),
            Effect::Detect { seq, text } => {
                let api = self.api.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let outcome = api
                        .detect_language(&text)
                        .await
                        .map_err(|err| err.to_string());
                    let _ = events.send(UiEvent::DetectionFinished { seq, outcome });
                });
            }
            Effect::Translate {
                seq,
                language,
                text,
            } => {
                let api = self.api.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let outcome = api
                        .translate(language, &text)
                        .await
                        .map_err(|err| err.to_string());
                    let _ = events.send(UiEvent::TranslationFinished { seq, outcome });
                });
            }
            Effect::StartRecording => {
                let sink = SpeechSink::new(self.events.clone());
                let started = match self.speech.as_mut() {
                    Some(recognizer) => recognizer.start(sink),
                    None => Err(SpeechError::Start("no recognizer available".to_string())),
                };
                if let Err(err) = started {
                    warn!(error = %err, "speech recognition unavailable");
                    let _ = self.events.send(UiEvent::RecordingFailed(err.to_string()));
                }
            }
            Effect::StopRecording => self.stop_recognizer(),
            Effect::ScheduleDismiss { id } => {
                let events = self.events.clone();
                // Replacing the handle cancels the previous notification's timer.
                self.dismiss = Some(schedule(self.settings.notification_ttl, move || {
                    let _ = events.send(UiEvent::NotificationExpired { id });
                }));
            }
        }
    }

    fn stop_recognizer(&mut self) {
        if let Some(recognizer) = self.speech.as_mut() {
            if let Err(err) = recognizer.stop() {
                warn!(error = %err, "failed to stop speech recognition");
            }
        }
    }

    fn teardown(&mut self) {
        self.detection.cancel();
        self.dismiss = None;
        if self.state.recording {
            self.stop_recognizer();
            self.state.recording = false;
            self.published.send_replace(self.state.clone());
        }
        debug!("translator session closed");
    }
}
