//! Playback configuration.

use serde::{Deserialize, Serialize};

/// How many extra passes run after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    Finite(u32),
    Infinite,
}

impl RepeatCount {
    /// True once `completed` repeats used up the budget.
    #[inline]
    pub fn is_exhausted(&self, completed: u32) -> bool {
        match self {
            Self::Finite(n) => completed >= *n,
            Self::Infinite => false,
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::Finite(0)
    }
}

/// What happens at the end of a pass that has repeats left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Jump back to the opposite bound and keep the direction
    #[default]
    Restart,
    /// Flip the direction and play back towards where the pass began
    Reverse,
}

/// Playback settings applied to a driver in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Speed multiplier; negative plays in reverse.
    pub speed: f32,
    pub repeat_count: RepeatCount,
    pub repeat_mode: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            repeat_count: RepeatCount::default(),
            repeat_mode: RepeatMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustion() {
        assert!(RepeatCount::Finite(0).is_exhausted(0));
        assert!(!RepeatCount::Finite(2).is_exhausted(1));
        assert!(RepeatCount::Finite(2).is_exhausted(2));
        assert!(!RepeatCount::Infinite.is_exhausted(u32::MAX));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: PlaybackConfig = serde_json::from_str(r#"{"speed": -2.0}"#).unwrap();
        assert_eq!(cfg.speed, -2.0);
        assert_eq!(cfg.repeat_count, RepeatCount::Finite(0));
        assert_eq!(cfg.repeat_mode, RepeatMode::Restart);

        let cfg: PlaybackConfig = serde_json::from_str(
            r#"{"repeat_count": "infinite", "repeat_mode": "reverse"}"#,
        )
        .unwrap();
        assert_eq!(cfg.repeat_count, RepeatCount::Infinite);
        assert_eq!(cfg.repeat_mode, RepeatMode::Reverse);

        let cfg: PlaybackConfig =
            serde_json::from_str(r#"{"repeat_count": {"finite": 3}}"#).unwrap();
        assert_eq!(cfg.repeat_count, RepeatCount::Finite(3));
    }
}
