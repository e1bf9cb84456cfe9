use tokio::time::Instant;

use crate::call::{AudioSource, CallSnapshot, CallState, OfferMediaKind};

use super::{CallDisplayContext, Rect, StatusPresentation, StatusPresenter};

/// Name and avatar resolved for the remote party.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactInfo {
    pub name: String,
    pub avatar: Option<Vec<u8>>,
}

/// Which button group is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlsLayout {
    /// Answer/decline for a ringing incoming call.
    Incoming { answer_with_video: bool },
    /// Mute, video, camera flip, audio source and hang up.
    Ongoing,
    /// The call is over; nothing is actionable.
    Hidden,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioSourceButton {
    pub label: String,
    /// More than two routes are available, so tapping opens a picker.
    pub shows_picker: bool,
    pub speaker_selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlsPresentation {
    pub layout: ControlsLayout,
    pub mute_selected: bool,
    pub video_selected: bool,
    pub flip_camera_visible: bool,
    pub audio_source: AudioSourceButton,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocalVideoLayout {
    Hidden,
    /// Pre-connection vanity view: the local preview fills the bounds.
    Fullscreen,
    Floating(Rect),
}

/// Audio route state read from the audio service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioRoutes {
    pub current: Option<AudioSource>,
    pub available: usize,
}

/// Inputs for a presentation pass that are not part of the call model.
#[derive(Clone, Debug)]
pub struct ScreenInputs<'a> {
    pub now: Instant,
    pub contact: &'a ContactInfo,
    pub audio: &'a AudioRoutes,
    pub controls_hidden: bool,
    pub minimized: bool,
    pub floating_frame: Option<Rect>,
}

/// Immutable projection of the call onto the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct CallPresentation {
    pub contact_name: String,
    pub status: StatusPresentation,
    pub blinking: bool,
    pub controls: ControlsPresentation,
    pub controls_hidden: bool,
    pub auto_hide_controls: bool,
    pub duration_ticking: bool,
    pub local_video: LocalVideoLayout,
    pub remote_video_visible: bool,
    pub avatar_visible: bool,
    pub on_hold: bool,
    pub minimized: bool,
}

impl CallPresentation {
    pub fn compute(call: &CallSnapshot, inputs: &ScreenInputs<'_>) -> Self {
        let connected_duration_seconds = call
            .connected_at
            .map(|at| inputs.now.saturating_duration_since(at).as_secs_f64())
            .unwrap_or(0.0);
        let status = StatusPresenter::present(&CallDisplayContext {
            state: call.state,
            offer_media_kind: call.offer_media_kind,
            direction: call.direction,
            error_kind: call.error_kind,
            connected_duration_seconds,
        });

        let layout = if status.is_terminal {
            ControlsLayout::Hidden
        } else if call.state == CallState::LocalRinging {
            ControlsLayout::Incoming {
                answer_with_video: call.offer_media_kind == OfferMediaKind::Video,
            }
        } else {
            ControlsLayout::Ongoing
        };

        let vanity = call.state.is_pre_connection() && call.has_local_video && !inputs.minimized;
        let local_video = if !call.has_local_video || status.is_terminal {
            LocalVideoLayout::Hidden
        } else if vanity {
            LocalVideoLayout::Fullscreen
        } else {
            match inputs.floating_frame {
                Some(frame) => LocalVideoLayout::Floating(frame),
                None => LocalVideoLayout::Hidden,
            }
        };
        let remote_video_visible = call.has_remote_video && !status.is_terminal && !vanity;

        let auto_hide_controls = call.state == CallState::Connected
            && call.is_video_call()
            && layout == ControlsLayout::Ongoing
            && !inputs.minimized;

        let speaker_selected = inputs
            .audio
            .current
            .as_ref()
            .map(AudioSource::is_speaker)
            .unwrap_or(false);
        let audio_source = AudioSourceButton {
            label: inputs
                .audio
                .current
                .as_ref()
                .map(|source| source.name.clone())
                .unwrap_or_else(|| "Audio".to_string()),
            shows_picker: inputs.audio.available > 2,
            speaker_selected,
        };

        Self {
            contact_name: inputs.contact.name.clone(),
            blinking: call.state == CallState::Reconnecting,
            duration_ticking: call.state == CallState::Connected,
            controls: ControlsPresentation {
                layout,
                mute_selected: call.is_muted,
                video_selected: call.has_local_video,
                flip_camera_visible: call.has_local_video && layout == ControlsLayout::Ongoing,
                audio_source,
            },
            controls_hidden: auto_hide_controls && inputs.controls_hidden,
            auto_hide_controls,
            local_video,
            remote_video_visible,
            avatar_visible: !remote_video_visible && local_video != LocalVideoLayout::Fullscreen,
            on_hold: call.is_on_hold,
            minimized: inputs.minimized,
            status,
        }
    }

    /// True while the local preview is the fullscreen vanity view.
    pub fn is_vanity(&self) -> bool {
        self.local_video == LocalVideoLayout::Fullscreen
    }
}
