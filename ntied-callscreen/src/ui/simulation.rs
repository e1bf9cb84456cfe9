use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::sleep;

use crate::call::{
    AudioService, AudioSource, AudioSourceKind, CallHandle, CallService, CallState, CameraFacing,
    ContactDirectory,
};

/// In-process stand-in for the calling subsystem used by the demo binary.
pub struct SimulatedCall {
    call: CallHandle,
    sources: Vec<AudioSource>,
    current: Mutex<AudioSource>,
}

impl SimulatedCall {
    pub fn new(call: CallHandle) -> Arc<Self> {
        let sources = vec![
            AudioSource::new("builtin", "iPhone", AudioSourceKind::BuiltIn),
            AudioSource::new("speaker", "Speaker", AudioSourceKind::Speaker),
        ];
        let current = Mutex::new(sources[0].clone());
        Arc::new(Self {
            call,
            sources,
            current,
        })
    }

    /// Walk an outgoing call through dialing, ringing and connected.
    pub fn dial(self: &Arc<Self>) {
        let this = self.clone();
        tokio::spawn(async move {
            this.call.set_state(CallState::Dialing).await;
            sleep(Duration::from_secs(1)).await;
            this.call.set_state(CallState::RemoteRinging).await;
            sleep(Duration::from_secs(2)).await;
            if this.call.state() != CallState::RemoteRinging {
                return;
            }
            this.call.set_state(CallState::Connected).await;
            this.call.set_remote_video(true).await;
        });
    }

    async fn route_to(&self, source: AudioSource) {
        *self.current.lock() = source.clone();
        self.call.audio_source_changed(Some(source)).await;
    }
}

#[async_trait]
impl CallService for SimulatedCall {
    async fn answer(&self, with_video: bool) -> Result<(), anyhow::Error> {
        self.call.set_state(CallState::Answering).await;
        if with_video {
            self.call.set_local_video(true).await;
        }
        self.call.set_state(CallState::Connected).await;
        Ok(())
    }

    async fn decline(&self) -> Result<(), anyhow::Error> {
        self.call.set_state(CallState::LocalHangup).await;
        Ok(())
    }

    async fn hang_up(&self) -> Result<(), anyhow::Error> {
        self.call.set_state(CallState::LocalHangup).await;
        Ok(())
    }

    async fn set_muted(&self, is_muted: bool) -> Result<(), anyhow::Error> {
        self.call.set_muted(is_muted).await;
        Ok(())
    }

    async fn set_local_video_enabled(&self, enabled: bool) -> Result<(), anyhow::Error> {
        self.call.set_local_video(enabled).await;
        Ok(())
    }

    async fn set_camera_facing(&self, facing: CameraFacing) -> Result<(), anyhow::Error> {
        self.call.set_camera_facing(facing).await;
        Ok(())
    }

    async fn set_audio_source(&self, source: AudioSource) -> Result<(), anyhow::Error> {
        self.route_to(source).await;
        Ok(())
    }

    async fn request_speakerphone(&self, enabled: bool) -> Result<(), anyhow::Error> {
        let kind = if enabled {
            AudioSourceKind::Speaker
        } else {
            AudioSourceKind::BuiltIn
        };
        let source = self
            .sources
            .iter()
            .find(|source| source.kind == kind)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No {:?} audio source", kind))?;
        self.route_to(source).await;
        Ok(())
    }
}

#[async_trait]
impl AudioService for SimulatedCall {
    async fn available_sources(&self) -> Vec<AudioSource> {
        self.sources.clone()
    }

    async fn current_source(&self) -> Option<AudioSource> {
        Some(self.current.lock().clone())
    }
}

#[async_trait]
impl ContactDirectory for SimulatedCall {
    async fn display_name(&self, _address: &str) -> Option<String> {
        Some("Alice Liddell".to_string())
    }
}
