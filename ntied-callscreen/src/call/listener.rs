use async_trait::async_trait;

use super::{AudioSource, CallState};

/// Change notifications emitted by the call model.
#[async_trait]
pub trait CallListener: Send + Sync {
    async fn on_call_state_changed(&self, state: CallState);
    async fn on_mute_changed(&self, is_muted: bool);
    async fn on_hold_changed(&self, is_on_hold: bool);
    async fn on_local_video_changed(&self, enabled: bool);
    async fn on_remote_video_changed(&self, enabled: bool);
    async fn on_audio_source_changed(&self, source: Option<AudioSource>);
}

pub struct StubListener;

#[async_trait]
impl CallListener for StubListener {
    async fn on_call_state_changed(&self, _state: CallState) {}
    async fn on_mute_changed(&self, _is_muted: bool) {}
    async fn on_hold_changed(&self, _is_on_hold: bool) {}
    async fn on_local_video_changed(&self, _enabled: bool) {}
    async fn on_remote_video_changed(&self, _enabled: bool) {}
    async fn on_audio_source_changed(&self, _source: Option<AudioSource>) {}
}
