use serde::{Deserialize, Serialize};

use lumo_keypath_core::KeyPathError;
use lumo_playback_core::PlaybackError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerError {
    #[error(transparent)]
    KeyPath(#[from] KeyPathError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl PlayerError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::KeyPath(e) => e.category(),
            Self::Playback(e) => e.category(),
        }
    }
}
