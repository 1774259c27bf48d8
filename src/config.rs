//! Panel tuning configuration
//!
//! Stored in `~/.config/placepage/config.yaml`. Every field has a default so
//! partial files load.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::panel::Easing;

/// Thresholds, ratios and durations driving the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Pointer travel (px) before a press becomes a drag
    pub touch_slop: f32,
    /// Release velocity (px/s) above which a drag counts as a fling
    pub min_fling_velocity: f32,
    /// Presses held longer than this are not taps
    pub long_press_timeout_ms: u64,
    /// Anchored top edge as a fraction of the parent height
    pub anchor_ratio: f32,
    /// Minimum peek for `OpeningMode::PreviewPlus` as a fraction of the parent height
    pub preview_plus_ratio: f32,
    /// Seconds of fling velocity projected when deciding to hide
    pub hide_friction: f32,
    /// Fraction of the peek height the projected top must pass below collapsed to hide
    pub hide_threshold: f32,
    pub settle_duration_ms: u64,
    pub peek_change_duration_ms: u64,
    /// The map viewport never gets shorter than this
    pub viewport_min_height: f32,
    /// Buttons shown in the bar before the rest go to the overflow menu
    pub max_buttons: usize,
    /// Skip animations; transitions complete on the next frame
    pub reduced_motion: bool,
    pub easing: Easing,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            min_fling_velocity: 500.0,
            long_press_timeout_ms: 500,
            anchor_ratio: 0.3,
            preview_plus_ratio: 0.45,
            hide_friction: 0.1,
            hide_threshold: 0.5,
            settle_duration_ms: 250,
            peek_change_duration_ms: 200,
            viewport_min_height: 96.0,
            max_buttons: 4,
            reduced_motion: false,
            easing: Easing::EaseOut,
        }
    }
}

impl PanelConfig {
    pub fn settle_duration(&self) -> Duration {
        self.animation_duration(self.settle_duration_ms)
    }

    pub fn peek_change_duration(&self) -> Duration {
        self.animation_duration(self.peek_change_duration_ms)
    }

    pub fn long_press_timeout(&self) -> Duration {
        Duration::from_millis(self.long_press_timeout_ms)
    }

    fn animation_duration(&self, ms: u64) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            Duration::from_millis(ms)
        }
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Self::default()
        })
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to disk
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
