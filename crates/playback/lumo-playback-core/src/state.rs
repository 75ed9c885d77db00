use serde::{Deserialize, Serialize};

/// Lifecycle state of a [`PlaybackDriver`](crate::PlaybackDriver)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing has been played yet
    #[default]
    Idle,
    /// Advancing on every tick
    Running,
    /// Halted by the host, resumable from the current frame
    Paused,
    /// Ran past the active range with no repeats left
    Ended,
    /// Stopped through `cancel()`
    Cancelled,
}

impl PlaybackState {
    /// Get the name of this playback state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether `cancel()`, `pause()` or `end()` have anything to stop
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Ended and cancelled stay put until the next play/resume
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

impl From<&str> for PlaybackState {
    fn from(s: &str) -> Self {
        match s {
            "running" => Self::Running,
            "paused" => Self::Paused,
            "ended" => Self::Ended,
            "cancelled" => Self::Cancelled,
            _ => Self::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for state in [
            PlaybackState::Idle,
            PlaybackState::Running,
            PlaybackState::Paused,
            PlaybackState::Ended,
            PlaybackState::Cancelled,
        ] {
            assert_eq!(PlaybackState::from(state.name()), state);
        }
        assert_eq!(PlaybackState::from("bogus"), PlaybackState::Idle);
    }

    #[test]
    fn predicates() {
        assert!(PlaybackState::Running.is_active());
        assert!(PlaybackState::Paused.is_active());
        assert!(!PlaybackState::Ended.is_active());
        assert!(PlaybackState::Cancelled.is_terminal());
        assert!(!PlaybackState::Idle.is_terminal());
    }
}
