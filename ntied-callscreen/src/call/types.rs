use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallState {
    Idle,
    Dialing,
    RemoteRinging,
    LocalRinging,
    Answering,
    Connected,
    Reconnecting,
    RemoteHangup,
    RemoteHangupNeedPermission,
    LocalHangup,
    RemoteBusy,
    LocalFailure,
    AnsweredElsewhere,
    DeclinedElsewhere,
    BusyElsewhere,
}

impl CallState {
    pub const ALL: [CallState; 15] = [
        CallState::Idle,
        CallState::Dialing,
        CallState::RemoteRinging,
        CallState::LocalRinging,
        CallState::Answering,
        CallState::Connected,
        CallState::Reconnecting,
        CallState::RemoteHangup,
        CallState::RemoteHangupNeedPermission,
        CallState::LocalHangup,
        CallState::RemoteBusy,
        CallState::LocalFailure,
        CallState::AnsweredElsewhere,
        CallState::DeclinedElsewhere,
        CallState::BusyElsewhere,
    ];

    /// States before media flows, where the local preview may fill the screen.
    pub fn is_pre_connection(&self) -> bool {
        matches!(
            self,
            CallState::Idle | CallState::Dialing | CallState::RemoteRinging | CallState::LocalRinging
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallState::Idle => "idle",
            CallState::Dialing => "dialing",
            CallState::RemoteRinging => "remote_ringing",
            CallState::LocalRinging => "local_ringing",
            CallState::Answering => "answering",
            CallState::Connected => "connected",
            CallState::Reconnecting => "reconnecting",
            CallState::RemoteHangup => "remote_hangup",
            CallState::RemoteHangupNeedPermission => "remote_hangup_need_permission",
            CallState::LocalHangup => "local_hangup",
            CallState::RemoteBusy => "remote_busy",
            CallState::LocalFailure => "local_failure",
            CallState::AnsweredElsewhere => "answered_elsewhere",
            CallState::DeclinedElsewhere => "declined_elsewhere",
            CallState::BusyElsewhere => "busy_elsewhere",
        }
    }
}

impl std::fmt::Display for CallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallDirection {
    Incoming,
    Outgoing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferMediaKind {
    Audio,
    Video,
}

/// Kind of a call setup error. Only `Timeout` changes what the user sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallErrorKind {
    Timeout,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFacing {
    #[default]
    Front,
    Back,
}

impl CameraFacing {
    pub fn flipped(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioSourceKind {
    BuiltIn,
    Speaker,
    Bluetooth,
    Headset,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioSource {
    pub id: String,
    pub name: String,
    pub kind: AudioSourceKind,
}

impl AudioSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AudioSourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn is_speaker(&self) -> bool {
        self.kind == AudioSourceKind::Speaker
    }
}
