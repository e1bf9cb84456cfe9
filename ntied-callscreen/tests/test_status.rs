use ntied_callscreen::call::{CallDirection, CallErrorKind, CallState, OfferMediaKind};
use ntied_callscreen::presentation::{
    CallDisplayContext, DismissDelay, StatusPresenter, format_call_duration,
};

fn context(state: CallState) -> CallDisplayContext {
    CallDisplayContext {
        state,
        offer_media_kind: OfferMediaKind::Audio,
        direction: CallDirection::Outgoing,
        error_kind: None,
        connected_duration_seconds: 0.0,
    }
}

#[test]
fn test_every_state_has_label_and_classification() {
    for state in CallState::ALL {
        let status = StatusPresenter::present(&context(state));
        assert!(!status.label.is_empty(), "{state} should have a label");
        let (terminal, delay) = match state {
            CallState::Idle => (true, DismissDelay::None),
            CallState::RemoteHangup | CallState::RemoteHangupNeedPermission => {
                (true, DismissDelay::Short)
            }
            CallState::LocalHangup => (true, DismissDelay::Immediate),
            CallState::Dialing
            | CallState::RemoteRinging
            | CallState::LocalRinging
            | CallState::Answering
            | CallState::Connected
            | CallState::Reconnecting => (false, DismissDelay::None),
            CallState::RemoteBusy
            | CallState::LocalFailure
            | CallState::AnsweredElsewhere
            | CallState::DeclinedElsewhere
            | CallState::BusyElsewhere => (true, DismissDelay::Short),
        };
        assert_eq!(status.is_terminal, terminal, "terminal flag for {state}");
        assert_eq!(status.dismiss_delay, delay, "dismiss delay for {state}");
    }
}

#[test]
fn test_fixed_labels() {
    let cases = [
        (CallState::Idle, "Call Ended"),
        (CallState::RemoteHangup, "Call Ended"),
        (CallState::RemoteHangupNeedPermission, "Call Ended"),
        (CallState::LocalHangup, "Call Ended"),
        (CallState::Dialing, "Connecting…"),
        (CallState::RemoteRinging, "Ringing…"),
        (CallState::Answering, "Securing connection…"),
        (CallState::Reconnecting, "Reconnecting…"),
        (CallState::RemoteBusy, "Recipient is busy"),
        (CallState::LocalFailure, "Call Failed"),
    ];
    for (state, label) in cases {
        assert_eq!(StatusPresenter::present(&context(state)).label, label);
    }
}

#[test]
fn test_elsewhere_labels_are_distinct() {
    let answered = StatusPresenter::present(&context(CallState::AnsweredElsewhere)).label;
    let declined = StatusPresenter::present(&context(CallState::DeclinedElsewhere)).label;
    let busy = StatusPresenter::present(&context(CallState::BusyElsewhere)).label;
    assert_ne!(answered, declined);
    assert_ne!(declined, busy);
    assert_ne!(answered, busy);
}

#[test]
fn test_local_ringing_depends_on_offer_kind() {
    let mut ctx = context(CallState::LocalRinging);
    ctx.direction = CallDirection::Incoming;
    let audio = StatusPresenter::present(&ctx).label;
    ctx.offer_media_kind = OfferMediaKind::Video;
    let video = StatusPresenter::present(&ctx).label;
    assert_eq!(audio, "Ringing (audio)");
    assert_eq!(video, "Ringing (video)");
}

#[test]
fn test_local_failure_no_answer_only_for_outgoing_timeout() {
    let mut ctx = context(CallState::LocalFailure);
    ctx.error_kind = Some(CallErrorKind::Timeout);
    assert_eq!(StatusPresenter::present(&ctx).label, "No Answer");

    ctx.direction = CallDirection::Incoming;
    assert_eq!(StatusPresenter::present(&ctx).label, "Call Failed");

    ctx.direction = CallDirection::Outgoing;
    ctx.error_kind = Some(CallErrorKind::Other);
    assert_eq!(StatusPresenter::present(&ctx).label, "Call Failed");

    ctx.error_kind = None;
    let status = StatusPresenter::present(&ctx);
    assert_eq!(status.label, "Call Failed");
    assert_eq!(status.dismiss_delay, DismissDelay::Short);
}

#[test]
fn test_connected_label_is_formatted_duration() {
    let mut ctx = context(CallState::Connected);
    ctx.connected_duration_seconds = 3725.0;
    assert_eq!(StatusPresenter::present(&ctx).label, "1:02:05");
}

#[test]
fn test_duration_formatting() {
    assert_eq!(format_call_duration(0.0), "00:00");
    assert_eq!(format_call_duration(45.0), "00:45");
    assert_eq!(format_call_duration(65.0), "01:05");
    assert_eq!(format_call_duration(3605.0), "1:00:05");
    assert_eq!(format_call_duration(3725.0), "1:02:05");
    assert_eq!(format_call_duration(35999.0), "9:59:59");
    assert_eq!(format_call_duration(36000.0), "10:00:00");
}

#[test]
fn test_presenter_is_pure() {
    let mut ctx = context(CallState::Connected);
    ctx.connected_duration_seconds = 12.0;
    assert_eq!(
        StatusPresenter::present(&ctx),
        StatusPresenter::present(&ctx)
    );
}
