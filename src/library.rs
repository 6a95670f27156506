//! Media listing: the index abstraction, its directory-backed implementation
//! and the `Song` list built from it.

use std::path::PathBuf;

use thiserror::Error;

mod index;
mod lister;
mod model;

pub use index::{DirectoryIndex, MediaIndex};
pub use lister::list_music;
pub use model::{MediaRow, Song};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("media index at {} is unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk media library: {0}")]
    Walk(#[from] walkdir::Error),
}
