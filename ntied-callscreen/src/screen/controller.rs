use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::call::{
    AudioService, AudioSource, CallHandle, CallService, ContactDirectory, contact_display_name,
};
use crate::config::CallScreenConfig;
use crate::presentation::{
    AudioRoutes, CallPresentation, ContactInfo, FloatingPreview, ScreenInputs,
};

use super::{
    CallEvent, CallScreenHost, Effect, ScreenEvent, TimerKind, TimerSet, UserAction,
    diff_effects,
};

/// External collaborators of the call screen.
#[derive(Clone)]
pub struct CallScreenDeps {
    pub service: Arc<dyn CallService>,
    pub audio: Arc<dyn AudioService>,
    pub contacts: Arc<dyn ContactDirectory>,
    pub host: Arc<dyn CallScreenHost>,
}

/// Drives the on-screen call experience from a single event loop.
pub struct CallScreen {
    config: CallScreenConfig,
    call: CallHandle,
    deps: CallScreenDeps,
    timers: TimerSet,
    preview: FloatingPreview,
    contact: ContactInfo,
    audio: AudioRoutes,
    presentation: Option<CallPresentation>,
    controls_hidden: bool,
    minimized: bool,
    status_alpha: f32,
    pending_speaker: Option<bool>,
    dismissed: bool,
}

impl CallScreen {
    pub fn new(
        config: CallScreenConfig,
        call: CallHandle,
        deps: CallScreenDeps,
        events: &mpsc::Sender<ScreenEvent>,
    ) -> Self {
        let preview = FloatingPreview::new(config.preview_size(), config.fling_duration());
        let contact = ContactInfo {
            name: call.remote_address(),
            avatar: None,
        };
        Self {
            timers: TimerSet::new(events.downgrade()),
            config,
            call,
            deps,
            preview,
            contact,
            audio: AudioRoutes::default(),
            presentation: None,
            controls_hidden: false,
            minimized: false,
            status_alpha: 1.0,
            pending_speaker: None,
            dismissed: false,
        }
    }

    pub fn presentation(&self) -> Option<&CallPresentation> {
        self.presentation.as_ref()
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn status_alpha(&self) -> f32 {
        self.status_alpha
    }

    /// Optimistic speakerphone state awaiting confirmation from the audio service.
    pub fn pending_speaker(&self) -> Option<bool> {
        self.pending_speaker
    }

    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    pub fn preview(&self) -> &FloatingPreview {
        &self.preview
    }

    /// Resolve contact and audio routes, then render the first presentation.
    pub async fn start(&mut self) {
        let address = self.call.remote_address();
        self.contact = ContactInfo {
            name: contact_display_name(self.deps.contacts.as_ref(), &address).await,
            avatar: self.deps.contacts.avatar(&address).await,
        };
        self.reload_audio_routes().await;
        tracing::info!(
            call_id = %self.call.call_id(),
            contact = %self.contact.name,
            "Call screen started"
        );
        self.refresh();
    }

    /// Process events until the screen is dismissed or every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::Receiver<ScreenEvent>) {
        self.start().await;
        while !self.dismissed {
            let Some(event) = rx.recv().await else {
                tracing::debug!("Screen event channel closed");
                break;
            };
            self.handle_event(event).await;
        }
        self.timers.cancel_all();
    }

    pub async fn handle_event(&mut self, event: ScreenEvent) {
        if self.dismissed {
            tracing::debug!(?event, "Ignoring event after dismissal");
            return;
        }
        match event {
            ScreenEvent::Call(event) => self.handle_call_event(event).await,
            ScreenEvent::User(action) => self.handle_user_action(action).await,
            ScreenEvent::Timer { kind, generation } => {
                if self.timers.accept(kind, generation) {
                    self.handle_timer(kind);
                } else {
                    tracing::trace!(?kind, generation, "Dropping stale timer event");
                }
            }
        }
    }

    /// Recompute the presentation from the call model and apply the side
    /// effects of whatever changed. Calling it again with nothing changed is a
    /// no-op.
    pub fn refresh(&mut self) -> Vec<Effect> {
        if self.dismissed {
            return Vec::new();
        }
        let call = self.call.snapshot();
        let next = CallPresentation::compute(
            &call,
            &ScreenInputs {
                now: Instant::now(),
                contact: &self.contact,
                audio: &self.audio,
                controls_hidden: self.controls_hidden,
                minimized: self.minimized,
                floating_frame: self.preview.frame(),
            },
        );
        let effects = diff_effects(self.presentation.as_ref(), &next);
        if self.presentation.as_ref() != Some(&next) {
            self.deps.host.render(&next);
        }
        self.presentation = Some(next);
        for effect in &effects {
            self.apply(*effect);
        }
        effects
    }

    fn apply(&mut self, effect: Effect) {
        tracing::debug!(?effect, "Applying screen effect");
        match effect {
            Effect::StartBlink => self
                .timers
                .schedule_repeating(TimerKind::Blink, self.config.blink_interval()),
            Effect::StopBlink => {
                self.timers.cancel(TimerKind::Blink);
                self.set_status_alpha(1.0);
            }
            Effect::StartDurationTicker => self
                .timers
                .schedule_repeating(TimerKind::DurationTick, self.config.duration_refresh()),
            Effect::StopDurationTicker => self.timers.cancel(TimerKind::DurationTick),
            Effect::ScheduleControlsHide => self
                .timers
                .schedule_once(TimerKind::ControlsHide, self.config.controls_auto_hide()),
            Effect::CancelControlsHide => {
                self.timers.cancel(TimerKind::ControlsHide);
                self.controls_hidden = false;
            }
            Effect::ScheduleDismiss => {
                if !self.timers.is_pending(TimerKind::Dismiss) {
                    self.timers
                        .schedule_once(TimerKind::Dismiss, self.config.dismiss_delay());
                }
            }
            Effect::DismissNow => self.dismiss(),
        }
    }

    fn handle_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Blink => {
                let alpha = if self.status_alpha > 0.5 { 0.0 } else { 1.0 };
                self.set_status_alpha(alpha);
            }
            TimerKind::DurationTick => {
                self.refresh();
            }
            TimerKind::ControlsHide => {
                self.controls_hidden = true;
                self.refresh();
            }
            TimerKind::Dismiss => self.dismiss(),
        }
    }

    async fn handle_call_event(&mut self, event: CallEvent) {
        tracing::debug!(?event, "Call event");
        if let CallEvent::AudioSourceChanged(source) = event {
            self.pending_speaker = None;
            self.audio.current = source;
            self.audio.available = self.deps.audio.available_sources().await.len();
        }
        self.refresh();
    }

    async fn handle_user_action(&mut self, action: UserAction) {
        tracing::debug!(?action, "User action");
        let call = self.call.snapshot();
        let result = match action {
            UserAction::Answer { with_video } => {
                tracing::info!(with_video, "Answering call");
                self.deps.service.answer(with_video).await
            }
            UserAction::Decline => {
                tracing::info!("Declining call");
                self.deps.service.decline().await
            }
            UserAction::HangUp => {
                tracing::info!("Hanging up call");
                self.deps.service.hang_up().await
            }
            UserAction::ToggleMute => self.deps.service.set_muted(!call.is_muted).await,
            UserAction::ToggleVideo => {
                self.deps
                    .service
                    .set_local_video_enabled(!call.has_local_video)
                    .await
            }
            UserAction::FlipCamera => {
                self.deps
                    .service
                    .set_camera_facing(call.camera_facing.flipped())
                    .await
            }
            UserAction::AudioSourceButton => self.audio_source_button().await,
            UserAction::SelectAudioSource(source) => self.select_audio_source(source).await,
            UserAction::TapBackground => {
                self.toggle_controls();
                return;
            }
            UserAction::PanChanged { translation } => {
                if self.is_vanity() {
                    return;
                }
                self.preview.pan_changed(translation);
                self.refresh();
                return;
            }
            UserAction::PanEnded { velocity } | UserAction::PanCancelled { velocity } => {
                if self.is_vanity() {
                    return;
                }
                if self.preview.pan_ended(velocity).is_some() {
                    self.refresh();
                }
                return;
            }
            UserAction::LayoutChanged(bounds) => {
                self.preview.set_bounds(bounds);
                self.refresh();
                return;
            }
            UserAction::Minimize => {
                self.minimized = true;
                self.deps.host.detach_video_surfaces();
                self.refresh();
                return;
            }
            UserAction::ReturnFromMinimized => {
                self.return_from_minimized();
                return;
            }
        };
        if let Err(err) = result {
            tracing::error!(?err, "Call command failed");
        }
        self.note_interaction();
    }

    /// Entry point for coming back from floating/minimized mode.
    pub fn return_from_minimized(&mut self) {
        self.minimized = false;
        self.deps.host.attach_video_surfaces();
        self.preview.resnap();
        self.refresh();
    }

    async fn audio_source_button(&mut self) -> Result<(), anyhow::Error> {
        if self.audio.available > 2 {
            let sources = self.deps.audio.available_sources().await;
            self.deps.host.show_audio_picker(&sources);
            return Ok(());
        }
        let speaker_selected = self.pending_speaker.unwrap_or_else(|| {
            self.audio
                .current
                .as_ref()
                .map(AudioSource::is_speaker)
                .unwrap_or(false)
        });
        let enable = !speaker_selected;
        self.pending_speaker = Some(enable);
        self.deps.host.show_audio_route_feedback(enable);
        self.deps.service.request_speakerphone(enable).await
    }

    async fn select_audio_source(&mut self, source: AudioSource) -> Result<(), anyhow::Error> {
        let speaker = source.is_speaker();
        self.pending_speaker = Some(speaker);
        self.deps.host.show_audio_route_feedback(speaker);
        self.deps.service.set_audio_source(source).await
    }

    fn toggle_controls(&mut self) {
        let eligible = self
            .presentation
            .as_ref()
            .map(|p| p.auto_hide_controls)
            .unwrap_or(false);
        if !eligible {
            return;
        }
        self.controls_hidden = !self.controls_hidden;
        if self.controls_hidden {
            self.timers.cancel(TimerKind::ControlsHide);
        } else {
            self.timers
                .schedule_once(TimerKind::ControlsHide, self.config.controls_auto_hide());
        }
        self.refresh();
    }

    /// Any control interaction reveals hidden controls and restarts the
    /// auto-hide countdown.
    fn note_interaction(&mut self) {
        let eligible = self
            .presentation
            .as_ref()
            .map(|p| p.auto_hide_controls)
            .unwrap_or(false);
        if !eligible || self.dismissed {
            return;
        }
        self.controls_hidden = false;
        self.timers
            .schedule_once(TimerKind::ControlsHide, self.config.controls_auto_hide());
        self.refresh();
    }

    fn is_vanity(&self) -> bool {
        self.presentation
            .as_ref()
            .map(CallPresentation::is_vanity)
            .unwrap_or(false)
    }

    fn set_status_alpha(&mut self, alpha: f32) {
        if self.status_alpha != alpha {
            self.status_alpha = alpha;
            self.deps.host.set_status_alpha(alpha);
        }
    }

    async fn reload_audio_routes(&mut self) {
        self.audio = AudioRoutes {
            current: self.deps.audio.current_source().await,
            available: self.deps.audio.available_sources().await.len(),
        };
    }

    fn dismiss(&mut self) {
        if self.dismissed {
            return;
        }
        self.dismissed = true;
        self.timers.cancel_all();
        tracing::info!(call_id = %self.call.call_id(), "Dismissing call screen");
        self.deps.host.dismiss();
    }
}
