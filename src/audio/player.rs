use std::path::Path;
use std::time::Duration;

use super::types::{AudioAttributes, PlaybackError};

/// One prepared audio source. Dropping the handle releases it.
pub trait Player {
    /// Start or resume from the current position.
    fn start(&mut self);
    fn pause(&mut self);
    /// Halt playback and rewind to the beginning; the handle stays usable.
    fn stop(&mut self);
    fn seek_to(&mut self, position: Duration) -> Result<(), PlaybackError>;
    fn position(&self) -> Duration;
    /// Total length, when the decoder can tell.
    fn duration(&self) -> Option<Duration>;
    fn is_playing(&self) -> bool;
}

/// Creates [`Player`] handles for files.
pub trait AudioBackend {
    type Player: Player;

    /// Open and prepare `path` synchronously. The handle comes back paused at zero.
    fn open(&self, path: &Path, attributes: AudioAttributes)
    -> Result<Self::Player, PlaybackError>;
}
