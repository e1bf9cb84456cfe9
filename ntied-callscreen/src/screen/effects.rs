use crate::presentation::{CallPresentation, DismissDelay};

/// Side effects derived from a presentation change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    StartBlink,
    StopBlink,
    StartDurationTicker,
    StopDurationTicker,
    ScheduleControlsHide,
    CancelControlsHide,
    ScheduleDismiss,
    DismissNow,
}

/// Effects needed to move from `previous` to `next`. Identical presentations
/// yield nothing.
pub fn diff_effects(previous: Option<&CallPresentation>, next: &CallPresentation) -> Vec<Effect> {
    let mut effects = Vec::new();

    let was_blinking = previous.map(|p| p.blinking).unwrap_or(false);
    match (was_blinking, next.blinking) {
        (false, true) => effects.push(Effect::StartBlink),
        (true, false) => effects.push(Effect::StopBlink),
        _ => {}
    }

    let was_ticking = previous.map(|p| p.duration_ticking).unwrap_or(false);
    match (was_ticking, next.duration_ticking) {
        (false, true) => effects.push(Effect::StartDurationTicker),
        (true, false) => effects.push(Effect::StopDurationTicker),
        _ => {}
    }

    let could_hide = previous.map(|p| p.auto_hide_controls).unwrap_or(false);
    match (could_hide, next.auto_hide_controls) {
        (false, true) => effects.push(Effect::ScheduleControlsHide),
        (true, false) => effects.push(Effect::CancelControlsHide),
        _ => {}
    }

    let previous_delay = previous
        .map(|p| p.status.dismiss_delay)
        .unwrap_or(DismissDelay::None);
    if previous_delay != next.status.dismiss_delay {
        match next.status.dismiss_delay {
            DismissDelay::Short => effects.push(Effect::ScheduleDismiss),
            DismissDelay::Immediate => effects.push(Effect::DismissNow),
            DismissDelay::None => {}
        }
    }

    effects
}
