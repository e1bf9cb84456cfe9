use std::time::Duration;

use crate::call::{CallDirection, CallErrorKind, CallState, OfferMediaKind};

/// Everything the status line depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CallDisplayContext {
    pub state: CallState,
    pub offer_media_kind: OfferMediaKind,
    pub direction: CallDirection,
    pub error_kind: Option<CallErrorKind>,
    pub connected_duration_seconds: f64,
}

/// How soon the call screen should go away after reaching a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissDelay {
    None,
    Short,
    Immediate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusPresentation {
    pub label: String,
    pub is_terminal: bool,
    pub dismiss_delay: DismissDelay,
}

impl StatusPresentation {
    fn ongoing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_terminal: false,
            dismiss_delay: DismissDelay::None,
        }
    }

    fn terminal(label: impl Into<String>, dismiss_delay: DismissDelay) -> Self {
        Self {
            label: label.into(),
            is_terminal: true,
            dismiss_delay,
        }
    }
}

pub const CALL_ENDED: &str = "Call Ended";
pub const CALL_FAILED: &str = "Call Failed";
pub const NO_ANSWER: &str = "No Answer";

pub struct StatusPresenter;

impl StatusPresenter {
    pub fn present(ctx: &CallDisplayContext) -> StatusPresentation {
        match ctx.state {
            CallState::Idle => StatusPresentation::terminal(CALL_ENDED, DismissDelay::None),
            CallState::RemoteHangup | CallState::RemoteHangupNeedPermission => {
                StatusPresentation::terminal(CALL_ENDED, DismissDelay::Short)
            }
            CallState::LocalHangup => {
                StatusPresentation::terminal(CALL_ENDED, DismissDelay::Immediate)
            }
            CallState::Dialing => StatusPresentation::ongoing("Connecting…"),
            CallState::RemoteRinging => StatusPresentation::ongoing("Ringing…"),
            CallState::LocalRinging => StatusPresentation::ongoing(match ctx.offer_media_kind {
                OfferMediaKind::Audio => "Ringing (audio)",
                OfferMediaKind::Video => "Ringing (video)",
            }),
            CallState::Answering => StatusPresentation::ongoing("Securing connection…"),
            CallState::Connected => {
                StatusPresentation::ongoing(format_call_duration(ctx.connected_duration_seconds))
            }
            CallState::Reconnecting => StatusPresentation::ongoing("Reconnecting…"),
            CallState::RemoteBusy => {
                StatusPresentation::terminal("Recipient is busy", DismissDelay::Short)
            }
            CallState::LocalFailure => {
                let label = match (ctx.error_kind, ctx.direction) {
                    (Some(CallErrorKind::Timeout), CallDirection::Outgoing) => NO_ANSWER,
                    _ => CALL_FAILED,
                };
                StatusPresentation::terminal(label, DismissDelay::Short)
            }
            CallState::AnsweredElsewhere => {
                StatusPresentation::terminal("Answered on another device", DismissDelay::Short)
            }
            CallState::DeclinedElsewhere => {
                StatusPresentation::terminal("Declined on another device", DismissDelay::Short)
            }
            CallState::BusyElsewhere => {
                tracing::warn!("Busy elsewhere reached the call screen, this should not happen");
                StatusPresentation::terminal("Busy on another device", DismissDelay::Short)
            }
        }
    }
}

/// Format a connected duration as `HH:MM:SS`, then drop a `00:` hour field or
/// a single leading zero of the hour field.
pub fn format_call_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let full = format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    );
    if let Some(rest) = full.strip_prefix("00:") {
        rest.to_string()
    } else if let Some(rest) = full.strip_prefix('0') {
        rest.to_string()
    } else {
        full
    }
}

/// Convenience for callers holding a `Duration`.
pub fn format_duration(duration: Duration) -> String {
    format_call_duration(duration.as_secs_f64())
}
