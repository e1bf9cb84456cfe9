use async_trait::async_trait;

use super::{AudioSource, CameraFacing};

/// Commands the screen issues to the calling subsystem.
#[async_trait]
pub trait CallService: Send + Sync {
    async fn answer(&self, with_video: bool) -> Result<(), anyhow::Error>;
    async fn decline(&self) -> Result<(), anyhow::Error>;
    async fn hang_up(&self) -> Result<(), anyhow::Error>;
    async fn set_muted(&self, is_muted: bool) -> Result<(), anyhow::Error>;
    async fn set_local_video_enabled(&self, enabled: bool) -> Result<(), anyhow::Error>;
    async fn set_camera_facing(&self, facing: CameraFacing) -> Result<(), anyhow::Error>;
    async fn set_audio_source(&self, source: AudioSource) -> Result<(), anyhow::Error>;
    async fn request_speakerphone(&self, enabled: bool) -> Result<(), anyhow::Error>;
}

#[async_trait]
pub trait AudioService: Send + Sync {
    async fn available_sources(&self) -> Vec<AudioSource>;
    async fn current_source(&self) -> Option<AudioSource>;
}

#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn display_name(&self, address: &str) -> Option<String>;

    /// Encoded avatar image, if the contact has one.
    async fn avatar(&self, _address: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Resolve the name shown for `address`, falling back to the address itself.
pub async fn contact_display_name(directory: &dyn ContactDirectory, address: &str) -> String {
    match directory.display_name(address).await {
        Some(name) if !name.trim().is_empty() => name,
        _ => address.to_string(),
    }
}
