//! Audio-related small types: output attributes and playback errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// What kind of sound a handle carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentType {
    Music,
}

/// What the sound is played for; selects the output volume.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Usage {
    Media,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioAttributes {
    pub content: ContentType,
    pub usage: Usage,
}

impl AudioAttributes {
    /// Attributes for songs picked from the library.
    pub const MUSIC: Self = Self {
        content: ContentType::Music,
        usage: Usage::Media,
    };
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
