//! Lumo playback core
//!
//! Owns the playback position of one composition: frame, active sub-range,
//! speed and direction, repeat handling, and lifecycle notifications to
//! registered listeners. Time is supplied by the host once per rendered frame.

pub mod composition;
pub mod config;
pub mod driver;
pub mod error;
pub mod listener;
pub mod state;

pub use composition::CompositionBounds;
pub use config::{PlaybackConfig, RepeatCount, RepeatMode};
pub use driver::PlaybackDriver;
pub use error::PlaybackError;
pub use listener::{EventRecorder, ListenerId, PlaybackEvent, PlaybackListener};
pub use state::PlaybackState;

/// Playback result type
pub type Result<T> = core::result::Result<T, PlaybackError>;
