//! Composition timeline bounds supplied by the asset loader.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::PlaybackError;

/// Frame bounds and rate of a composition. Fixed once a composition is bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionBounds {
    pub start_frame: f32,
    pub end_frame: f32,
    /// Frames per second.
    pub frame_rate: f32,
}

impl CompositionBounds {
    pub fn new(start_frame: f32, end_frame: f32, frame_rate: f32) -> Self {
        Self {
            start_frame,
            end_frame,
            frame_rate,
        }
    }

    pub fn validate(&self) -> Result<(), PlaybackError> {
        if !self.start_frame.is_finite()
            || !self.end_frame.is_finite()
            || self.start_frame > self.end_frame
        {
            return Err(PlaybackError::InvalidComposition {
                start_frame: self.start_frame,
                end_frame: self.end_frame,
            });
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(PlaybackError::InvalidFrameRate {
                frame_rate: self.frame_rate,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn duration_frames(&self) -> f32 {
        self.end_frame - self.start_frame
    }

    /// Wall-clock length at unit speed. Zero for invalid bounds, saturating at
    /// `Duration::MAX`.
    pub fn duration(&self) -> Duration {
        if self.validate().is_err() {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f32(self.duration_frames() / self.frame_rate)
            .unwrap_or(Duration::MAX)
    }

    #[inline]
    pub fn contains(&self, frame: f32) -> bool {
        frame >= self.start_frame && frame <= self.end_frame
    }
}
