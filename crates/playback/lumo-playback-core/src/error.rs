//! Error types for the playback driver

use serde::{Deserialize, Serialize};

/// Caller contract violations reported by [`PlaybackDriver`](crate::PlaybackDriver).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackError {
    /// An operation needs composition bounds that were never set
    #[error("no composition is bound to the driver")]
    NoComposition,

    /// Composition end precedes its start (or either is not finite)
    #[error("invalid composition bounds [{start_frame}, {end_frame}]")]
    InvalidComposition { start_frame: f32, end_frame: f32 },

    /// Frame rate must be finite and positive
    #[error("invalid frame rate: {frame_rate}")]
    InvalidFrameRate { frame_rate: f32 },

    /// Sub-range bound outside the composition
    #[error("frame {frame} is out of range [{start}, {end}]")]
    FrameOutOfRange { frame: f32, start: f32, end: f32 },

    /// Sub-range with min above max
    #[error("min frame ({min}) must be <= max frame ({max})")]
    InvertedRange { min: f32, max: f32 },
}

impl PlaybackError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NoComposition => "state",
            Self::InvalidComposition { .. } | Self::InvalidFrameRate { .. } => "composition",
            Self::FrameOutOfRange { .. } | Self::InvertedRange { .. } => "range",
        }
    }
}
