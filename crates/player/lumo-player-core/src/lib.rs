//! Lumo player core
//!
//! Composes the key path, playback and diagnostics cores into a single
//! composition player: the host binds a content tree, attaches value
//! callbacks by key path, then calls [`CompositionPlayer::advance`] once per
//! rendered frame and reports render times back.

pub mod config;
pub mod error;
pub mod player;

pub use config::PlayerConfig;
pub use error::PlayerError;
pub use player::{CompositionPlayer, PlayerFrame};

pub use lumo_diagnostics_core as diagnostics;
pub use lumo_keypath_core as keypath;
pub use lumo_playback_core as playback;

/// Player result type
pub type Result<T> = core::result::Result<T, PlayerError>;
