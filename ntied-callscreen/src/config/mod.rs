use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use serde::{Deserialize, Serialize};

use crate::presentation::Size;

/// Environment variable pointing at an absolute path of a JSON config file.
pub const CONFIG_ENV: &str = "NTIED_CALLSCREEN_CONFIG";

const MIN_PERIOD_MS: u64 = 1;

/// Timing and geometry knobs of the call screen.
/// Keys (all optional in the JSON file):
/// - `"dismiss_delay_ms"`: delay before a failed/ended call screen goes away
/// - `"controls_auto_hide_ms"`: idle time before video call controls hide
/// - `"blink_interval_ms"`: half period of the reconnecting blink
/// - `"duration_refresh_ms"`: connected duration label refresh period
/// - `"preview_width"` / `"preview_height"`: floating local preview size
/// - `"fling_duration_ms"`: how far a released drag is extrapolated
/// - `"event_queue_capacity"`: screen event channel size
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallScreenConfig {
    pub dismiss_delay_ms: u64,
    pub controls_auto_hide_ms: u64,
    pub blink_interval_ms: u64,
    pub duration_refresh_ms: u64,
    pub preview_width: f64,
    pub preview_height: f64,
    pub fling_duration_ms: u64,
    pub event_queue_capacity: usize,
}

impl Default for CallScreenConfig {
    fn default() -> Self {
        Self {
            dismiss_delay_ms: 1500,
            controls_auto_hide_ms: 5000,
            blink_interval_ms: 1000,
            duration_refresh_ms: 1000,
            preview_width: 90.0,
            preview_height: 120.0,
            fling_duration_ms: 250,
            event_queue_capacity: 100,
        }
    }
}

impl CallScreenConfig {
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }

    pub fn controls_auto_hide(&self) -> Duration {
        Duration::from_millis(self.controls_auto_hide_ms)
    }

    /// Never zero, repeating timers cannot tick with a zero period.
    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms.max(MIN_PERIOD_MS))
    }

    /// Never zero, see [`Self::blink_interval`].
    pub fn duration_refresh(&self) -> Duration {
        Duration::from_millis(self.duration_refresh_ms.max(MIN_PERIOD_MS))
    }

    /// Never zero, a bounded channel needs room for at least one event.
    pub fn queue_capacity(&self) -> usize {
        self.event_queue_capacity.max(1)
    }

    pub fn fling_duration(&self) -> Duration {
        Duration::from_millis(self.fling_duration_ms)
    }

    pub fn preview_size(&self) -> Size {
        Size::new(self.preview_width, self.preview_height)
    }

    /// Load from `$NTIED_CALLSCREEN_CONFIG` or the default config path.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, anyhow::Error> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("Failed to parse config '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), anyhow::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config '{}'", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.preview_width > 0.0 && self.preview_height > 0.0) {
            return Err(anyhow!(
                "Preview size must be positive, got {}x{}",
                self.preview_width,
                self.preview_height
            ));
        }
        if self.blink_interval_ms == 0 || self.duration_refresh_ms == 0 {
            return Err(anyhow!("Blink and duration refresh intervals must be non-zero"));
        }
        if self.event_queue_capacity == 0 {
            return Err(anyhow!("Event queue capacity must be non-zero"));
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf, anyhow::Error> {
        if let Ok(custom) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(custom);
            if path.is_absolute() {
                return Ok(path);
            } else {
                tracing::warn!("{} is not an absolute path, using default", CONFIG_ENV);
            }
        }
        let base_dir = dirs::config_dir()
            .or_else(|| dirs::data_dir())
            .context("Failed to determine config directory")?;
        Ok(base_dir.join("ntied").join("callscreen.json"))
    }
}
