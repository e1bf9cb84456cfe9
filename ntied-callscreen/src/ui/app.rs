use std::any::TypeId;
use std::sync::Arc;
use std::time::Instant;

use iced::futures::sink::SinkExt as _;
use iced::widget::{column, container, text};
use iced::{Element, Length, Subscription, Task, stream};
use tokio::sync::{Mutex as TokioMutex, mpsc};

use crate::call::{AudioSource, CallDirection, CallHandle, OfferMediaKind};
use crate::config::CallScreenConfig;
use crate::presentation::{CallPresentation, Rect, Vector};
use crate::screen::{
    CallEventListener, CallScreen, CallScreenDeps, CallScreenHost, ScreenEvent, UserAction,
};

use super::{SimulatedCall, ViewMessage, ViewOverlay, call_view};

pub const WINDOW_WIDTH: f64 = 420.0;
pub const WINDOW_HEIGHT: f64 = 760.0;

/// What the call screen asked the window to do.
#[derive(Clone, Debug)]
pub enum HostUpdate {
    Render(CallPresentation),
    StatusAlpha(f32),
    AudioRouteFeedback(bool),
    AudioPicker(Vec<AudioSource>),
    VideoSurfaces { attached: bool },
    Dismissed,
}

/// `CallScreenHost` that forwards every request to the iced application.
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<HostUpdate>,
}

impl ChannelHost {
    pub fn new(tx: mpsc::UnboundedSender<HostUpdate>) -> Self {
        Self { tx }
    }

    fn send(&self, update: HostUpdate) {
        if let Err(err) = self.tx.send(update) {
            tracing::error!(?err, "Cannot send host update");
        }
    }
}

impl CallScreenHost for ChannelHost {
    fn render(&self, presentation: &CallPresentation) {
        self.send(HostUpdate::Render(presentation.clone()));
    }

    fn dismiss(&self) {
        self.send(HostUpdate::Dismissed);
    }

    fn set_status_alpha(&self, alpha: f32) {
        self.send(HostUpdate::StatusAlpha(alpha));
    }

    fn show_audio_route_feedback(&self, speaker_selected: bool) {
        self.send(HostUpdate::AudioRouteFeedback(speaker_selected));
    }

    fn show_audio_picker(&self, sources: &[AudioSource]) {
        self.send(HostUpdate::AudioPicker(sources.to_vec()));
    }

    fn attach_video_surfaces(&self) {
        self.send(HostUpdate::VideoSurfaces { attached: true });
    }

    fn detach_video_surfaces(&self) {
        self.send(HostUpdate::VideoSurfaces { attached: false });
    }
}

#[derive(Clone, Debug)]
pub enum AppMessage {
    Host(HostUpdate),
    View(ViewMessage),
    Action(UserAction),
    Started,
}

/// Floating preview drag in progress.
struct PreviewDrag {
    last: iced::Point,
    at: Instant,
    velocity: Vector,
}

pub struct CallApp {
    presentation: Option<CallPresentation>,
    overlay: ViewOverlay,
    audio_picker: Vec<AudioSource>,
    pointer: Option<iced::Point>,
    drag: Option<PreviewDrag>,
    events: mpsc::Sender<ScreenEvent>,
    updates: Arc<TokioMutex<mpsc::UnboundedReceiver<HostUpdate>>>,
}

impl CallApp {
    pub fn new() -> (Self, Task<AppMessage>) {
        let config = CallScreenConfig::load().unwrap_or_else(|err| {
            tracing::warn!(?err, "Cannot load call screen config, using defaults");
            CallScreenConfig::default()
        });
        let (events_tx, events_rx) = mpsc::channel(config.queue_capacity());
        let (host_tx, host_rx) = mpsc::unbounded_channel();

        let listener = Arc::new(CallEventListener::new(events_tx.clone()));
        let call = CallHandle::new(
            "alice@ntied",
            CallDirection::Outgoing,
            OfferMediaKind::Video,
            listener,
        );
        let simulated = SimulatedCall::new(call.clone());
        let deps = CallScreenDeps {
            service: simulated.clone(),
            audio: simulated.clone(),
            contacts: simulated.clone(),
            host: Arc::new(ChannelHost::new(host_tx)),
        };
        let screen = CallScreen::new(config, call, deps, &events_tx);

        let bounds = Rect::new(16.0, 120.0, WINDOW_WIDTH - 32.0, WINDOW_HEIGHT - 240.0);
        if let Err(err) = events_tx.try_send(UserAction::LayoutChanged(bounds).into()) {
            tracing::error!(?err, "Cannot send initial layout");
        }

        let app = Self {
            presentation: None,
            overlay: ViewOverlay::default(),
            audio_picker: Vec::new(),
            pointer: None,
            drag: None,
            events: events_tx,
            updates: Arc::new(TokioMutex::new(host_rx)),
        };
        let task = Task::perform(
            async move {
                tokio::spawn(screen.run(events_rx));
                simulated.dial();
            },
            |_| AppMessage::Started,
        );
        (app, task)
    }

    pub fn title(&self) -> String {
        match &self.presentation {
            Some(presentation) => format!("ntied: {}", presentation.contact_name),
            None => "ntied: Call".to_string(),
        }
    }

    pub fn subscription(&self) -> Subscription<AppMessage> {
        let updates = self.updates.clone();
        let host_sub = stream::channel(100, move |mut output| async move {
            loop {
                let mut rx = updates.lock().await;
                match rx.recv().await {
                    Some(update) => {
                        let _ = output.send(AppMessage::Host(update)).await;
                    }
                    None => {
                        break;
                    }
                }
            }
        });
        Subscription::run_with_id(TypeId::of::<HostUpdate>(), host_sub)
    }

    pub fn update(&mut self, message: AppMessage) -> Task<AppMessage> {
        match message {
            AppMessage::Host(HostUpdate::Render(presentation)) => {
                let route_changed = self.presentation.as_ref().is_none_or(|previous| {
                    previous.controls.audio_source != presentation.controls.audio_source
                });
                if route_changed {
                    self.overlay.speaker_feedback = None;
                }
                self.presentation = Some(presentation);
                Task::none()
            }
            AppMessage::Host(HostUpdate::StatusAlpha(alpha)) => {
                self.overlay.status_alpha = alpha;
                Task::none()
            }
            AppMessage::Host(HostUpdate::AudioRouteFeedback(speaker_selected)) => {
                self.overlay.speaker_feedback = Some(speaker_selected);
                Task::none()
            }
            AppMessage::Host(HostUpdate::VideoSurfaces { attached }) => {
                self.overlay.video_attached = attached;
                Task::none()
            }
            AppMessage::Host(HostUpdate::AudioPicker(sources)) => {
                self.audio_picker = sources;
                Task::none()
            }
            AppMessage::Host(HostUpdate::Dismissed) => iced::exit(),
            AppMessage::View(message) => {
                self.handle_view(message);
                Task::none()
            }
            AppMessage::Action(action) => {
                self.send_action(action);
                Task::none()
            }
            AppMessage::Started => Task::none(),
        }
    }

    fn handle_view(&mut self, message: ViewMessage) {
        match message {
            ViewMessage::Action(action) => self.send_action(action),
            ViewMessage::PreviewGrabbed => {
                if let Some(pointer) = self.pointer {
                    self.drag = Some(PreviewDrag {
                        last: pointer,
                        at: Instant::now(),
                        velocity: Vector::new(0.0, 0.0),
                    });
                }
            }
            ViewMessage::PointerMoved(pointer) => {
                self.pointer = Some(pointer);
                let Some(drag) = self.drag.as_mut() else {
                    return;
                };
                let translation = Vector::new(
                    f64::from(pointer.x - drag.last.x),
                    f64::from(pointer.y - drag.last.y),
                );
                let elapsed = drag.at.elapsed().as_secs_f64();
                if elapsed > 0.0 {
                    drag.velocity = translation.scaled(1.0 / elapsed);
                }
                drag.last = pointer;
                drag.at = Instant::now();
                self.send_action(UserAction::PanChanged { translation });
            }
            ViewMessage::PointerReleased => {
                if let Some(drag) = self.drag.take() {
                    self.send_action(UserAction::PanEnded {
                        velocity: drag.velocity,
                    });
                }
            }
        }
    }

    fn send_action(&mut self, action: UserAction) {
        if let UserAction::SelectAudioSource(_) = action {
            self.audio_picker.clear();
        }
        if let Err(err) = self.events.try_send(action.into()) {
            tracing::error!(?err, "Cannot send user action");
        }
    }

    pub fn view(&self) -> Element<'_, AppMessage> {
        let Some(presentation) = &self.presentation else {
            return container(text("Starting call…").size(20))
                .center(Length::Fill)
                .into();
        };
        let screen = call_view(presentation, self.overlay).map(AppMessage::View);
        if self.audio_picker.is_empty() {
            return screen;
        }
        let picker = self.audio_picker.iter().fold(column![].spacing(8), |col, source| {
            col.push(
                iced::widget::button(text(source.name.as_str()))
                    .on_press(AppMessage::Action(UserAction::SelectAudioSource(
                        source.clone(),
                    ))),
            )
        });
        column![screen, container(picker).center_x(Length::Fill).padding(16)].into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> (CallApp, mpsc::Receiver<ScreenEvent>) {
        let (events, rx) = mpsc::channel(16);
        let (_host_tx, host_rx) = mpsc::unbounded_channel();
        let app = CallApp {
            presentation: None,
            overlay: ViewOverlay::default(),
            audio_picker: Vec::new(),
            pointer: None,
            drag: None,
            events,
            updates: Arc::new(TokioMutex::new(host_rx)),
        };
        (app, rx)
    }

    #[test]
    fn test_channel_host_forwards_feedback_and_surfaces() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let host = ChannelHost::new(tx);
        host.show_audio_route_feedback(true);
        host.detach_video_surfaces();
        host.attach_video_surfaces();
        assert!(matches!(rx.try_recv(), Ok(HostUpdate::AudioRouteFeedback(true))));
        assert!(matches!(
            rx.try_recv(),
            Ok(HostUpdate::VideoSurfaces { attached: false })
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(HostUpdate::VideoSurfaces { attached: true })
        ));
    }

    #[test]
    fn test_host_updates_fill_overlay() {
        let (mut app, _rx) = app();
        let _ = app.update(AppMessage::Host(HostUpdate::AudioRouteFeedback(true)));
        let _ = app.update(AppMessage::Host(HostUpdate::VideoSurfaces { attached: false }));
        assert_eq!(app.overlay.speaker_feedback, Some(true));
        assert!(!app.overlay.video_attached);
    }

    #[test]
    fn test_preview_drag_emits_pan_events() {
        let (mut app, mut rx) = app();
        let _ = app.update(AppMessage::View(ViewMessage::PointerMoved(iced::Point::new(
            10.0, 10.0,
        ))));
        let _ = app.update(AppMessage::View(ViewMessage::PreviewGrabbed));
        let _ = app.update(AppMessage::View(ViewMessage::PointerMoved(iced::Point::new(
            30.0, 50.0,
        ))));
        let _ = app.update(AppMessage::View(ViewMessage::PointerReleased));

        assert_eq!(
            rx.try_recv().unwrap(),
            ScreenEvent::User(UserAction::PanChanged {
                translation: Vector::new(20.0, 40.0),
            })
        );
        assert!(matches!(
            rx.try_recv(),
            Ok(ScreenEvent::User(UserAction::PanEnded { .. }))
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_pointer_moves_without_grab_are_ignored() {
        let (mut app, mut rx) = app();
        let _ = app.update(AppMessage::View(ViewMessage::PointerMoved(iced::Point::new(
            10.0, 10.0,
        ))));
        let _ = app.update(AppMessage::View(ViewMessage::PointerReleased));
        assert!(rx.try_recv().is_err());
    }
}
