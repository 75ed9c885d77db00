use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lumo_playback_core::PlaybackConfig;

/// Player setup applied when a composition is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub playback: PlaybackConfig,
    /// Collect per-segment render times.
    pub performance_tracking: bool,
    /// Active sub-range; `None` keeps the composition bound.
    pub min_frame: Option<f32>,
    pub max_frame: Option<f32>,
    /// Start playing as soon as the composition is bound.
    pub auto_play: bool,
}

impl PlayerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse player config")
    }
}
