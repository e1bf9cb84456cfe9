use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::call::{AudioSource, CallListener, CallState};
use crate::presentation::{Rect, Vector};

/// Observations from the call model.
#[derive(Clone, Debug, PartialEq)]
pub enum CallEvent {
    StateChanged(CallState),
    MuteChanged(bool),
    HoldChanged(bool),
    LocalVideoChanged(bool),
    RemoteVideoChanged(bool),
    AudioSourceChanged(Option<AudioSource>),
}

/// Things the user did on the call screen.
#[derive(Clone, Debug, PartialEq)]
pub enum UserAction {
    Answer { with_video: bool },
    Decline,
    HangUp,
    ToggleMute,
    ToggleVideo,
    FlipCamera,
    AudioSourceButton,
    SelectAudioSource(AudioSource),
    TapBackground,
    PanChanged { translation: Vector },
    PanEnded { velocity: Vector },
    PanCancelled { velocity: Vector },
    LayoutChanged(Rect),
    Minimize,
    ReturnFromMinimized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Blink,
    DurationTick,
    ControlsHide,
    Dismiss,
}

impl TimerKind {
    pub const ALL: [TimerKind; 4] = [
        TimerKind::Blink,
        TimerKind::DurationTick,
        TimerKind::ControlsHide,
        TimerKind::Dismiss,
    ];
}

/// Everything the call screen reacts to, consumed by a single dispatcher.
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenEvent {
    Call(CallEvent),
    User(UserAction),
    Timer { kind: TimerKind, generation: u64 },
}

impl From<CallEvent> for ScreenEvent {
    fn from(event: CallEvent) -> Self {
        ScreenEvent::Call(event)
    }
}

impl From<UserAction> for ScreenEvent {
    fn from(action: UserAction) -> Self {
        ScreenEvent::User(action)
    }
}

type Backlog = Arc<Mutex<Option<mpsc::UnboundedSender<ScreenEvent>>>>;

/// Forwards call model notifications into the screen event queue.
///
/// Forwarding never waits for queue space, because the screen may itself be
/// awaiting the call service that triggered the notification. When the queue
/// is full, events go to a backlog drained in order by a background task.
pub struct CallEventListener {
    tx: mpsc::Sender<ScreenEvent>,
    backlog: Backlog,
}

impl CallEventListener {
    pub fn new(tx: mpsc::Sender<ScreenEvent>) -> Self {
        Self {
            tx,
            backlog: Arc::new(Mutex::new(None)),
        }
    }

    fn forward(&self, event: CallEvent) {
        let mut backlog = self.backlog.lock();
        let event = match backlog.as_ref() {
            Some(pending) => match pending.send(ScreenEvent::Call(event)) {
                Ok(()) => return,
                Err(mpsc::error::SendError(event)) => event,
            },
            None => ScreenEvent::Call(event),
        };
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::debug!(?event, "Screen event queue is full, deferring");
                let (pending, rx) = mpsc::unbounded_channel();
                let _ = pending.send(event);
                *backlog = Some(pending);
                tokio::spawn(drain_backlog(self.tx.clone(), rx, self.backlog.clone()));
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::error!(?event, "Cannot send screen event, queue closed");
            }
        }
    }
}

async fn drain_backlog(
    tx: mpsc::Sender<ScreenEvent>,
    mut rx: mpsc::UnboundedReceiver<ScreenEvent>,
    backlog: Backlog,
) {
    loop {
        let event = match rx.try_recv() {
            Ok(event) => event,
            Err(_) => {
                // The listener pushes under the same lock, so an empty check
                // here cannot race with a new deferred event.
                let mut guard = backlog.lock();
                match rx.try_recv() {
                    Ok(event) => event,
                    Err(_) => {
                        *guard = None;
                        return;
                    }
                }
            }
        };
        if let Err(err) = tx.send(event).await {
            tracing::error!(?err, "Cannot send screen event");
            *backlog.lock() = None;
            return;
        }
    }
}

#[async_trait]
impl CallListener for CallEventListener {
    async fn on_call_state_changed(&self, state: CallState) {
        self.forward(CallEvent::StateChanged(state));
    }

    async fn on_mute_changed(&self, is_muted: bool) {
        self.forward(CallEvent::MuteChanged(is_muted));
    }

    async fn on_hold_changed(&self, is_on_hold: bool) {
        self.forward(CallEvent::HoldChanged(is_on_hold));
    }

    async fn on_local_video_changed(&self, enabled: bool) {
        self.forward(CallEvent::LocalVideoChanged(enabled));
    }

    async fn on_remote_video_changed(&self, enabled: bool) {
        self.forward(CallEvent::RemoteVideoChanged(enabled));
    }

    async fn on_audio_source_changed(&self, source: Option<AudioSource>) {
        self.forward(CallEvent::AudioSourceChanged(source));
    }
}
