//! Embedded cover art: extraction, decoding and terminal rendering.

use thiserror::Error;

mod art;
mod loader;
mod render;

pub use art::CoverArt;
pub use loader::load_cover;
pub use render::CoverView;

/// What the cover panel shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cover {
    Art(CoverArt),
    #[default]
    Placeholder,
}

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("failed to read tags: {0}")]
    Tags(#[from] lofty::error::LoftyError),
    #[error("failed to decode picture: {0}")]
    Decode(#[from] image::ImageError),
}
