use std::sync::Arc;

use parking_lot::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use super::{
    AudioSource, CallDirection, CallErrorKind, CallListener, CallState, CameraFacing,
    OfferMediaKind,
};

/// Read-only copy of the call model taken for a single render.
#[derive(Clone, Debug, PartialEq)]
pub struct CallSnapshot {
    pub call_id: Uuid,
    pub remote_address: String,
    pub direction: CallDirection,
    pub offer_media_kind: OfferMediaKind,
    pub state: CallState,
    pub error_kind: Option<CallErrorKind>,
    pub is_muted: bool,
    pub is_on_hold: bool,
    pub has_local_video: bool,
    pub has_remote_video: bool,
    pub camera_facing: CameraFacing,
    pub connected_at: Option<Instant>,
}

impl CallSnapshot {
    pub fn is_video_call(&self) -> bool {
        self.has_local_video || self.has_remote_video
    }
}

/// Shared call model. The call service owns and mutates it; the screen only
/// reads snapshots and listens for change notifications.
#[derive(Clone)]
pub struct CallHandle {
    inner: Arc<RwLock<CallSnapshot>>,
    listener: Arc<dyn CallListener>,
}

impl CallHandle {
    pub fn new(
        remote_address: impl Into<String>,
        direction: CallDirection,
        offer_media_kind: OfferMediaKind,
        listener: Arc<dyn CallListener>,
    ) -> Self {
        let snapshot = CallSnapshot {
            call_id: Uuid::now_v7(),
            remote_address: remote_address.into(),
            direction,
            offer_media_kind,
            state: CallState::Idle,
            error_kind: None,
            is_muted: false,
            is_on_hold: false,
            has_local_video: direction == CallDirection::Outgoing
                && offer_media_kind == OfferMediaKind::Video,
            has_remote_video: false,
            camera_facing: CameraFacing::Front,
            connected_at: None,
        };
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
            listener,
        }
    }

    pub fn call_id(&self) -> Uuid {
        self.inner.read().call_id
    }

    pub fn remote_address(&self) -> String {
        self.inner.read().remote_address.clone()
    }

    pub fn snapshot(&self) -> CallSnapshot {
        self.inner.read().clone()
    }

    pub fn state(&self) -> CallState {
        self.inner.read().state
    }

    pub async fn set_state(&self, state: CallState) {
        {
            let mut call = self.inner.write();
            if state == CallState::Connected && call.connected_at.is_none() {
                call.connected_at = Some(Instant::now());
            }
            call.state = state;
        }
        tracing::debug!(call_id = %self.call_id(), %state, "Call state changed");
        self.listener.on_call_state_changed(state).await;
    }

    /// Move to `LocalFailure` with the given error kind.
    pub async fn fail(&self, error_kind: CallErrorKind) {
        self.inner.write().error_kind = Some(error_kind);
        self.set_state(CallState::LocalFailure).await;
    }

    pub async fn set_muted(&self, is_muted: bool) {
        self.inner.write().is_muted = is_muted;
        self.listener.on_mute_changed(is_muted).await;
    }

    pub async fn set_on_hold(&self, is_on_hold: bool) {
        self.inner.write().is_on_hold = is_on_hold;
        self.listener.on_hold_changed(is_on_hold).await;
    }

    pub async fn set_local_video(&self, enabled: bool) {
        self.inner.write().has_local_video = enabled;
        self.listener.on_local_video_changed(enabled).await;
    }

    pub async fn set_remote_video(&self, enabled: bool) {
        self.inner.write().has_remote_video = enabled;
        self.listener.on_remote_video_changed(enabled).await;
    }

    pub async fn set_camera_facing(&self, facing: CameraFacing) {
        let has_local_video = {
            let mut call = self.inner.write();
            call.camera_facing = facing;
            call.has_local_video
        };
        self.listener.on_local_video_changed(has_local_video).await;
    }

    /// Report that audio output moved to `source`.
    pub async fn audio_source_changed(&self, source: Option<AudioSource>) {
        self.listener.on_audio_source_changed(source).await;
    }
}
