use std::path::PathBuf;

/// A playable entry of the song list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub path: PathBuf,
}

/// One record as returned by a [`MediaIndex`](super::MediaIndex) query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaRow {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub path: PathBuf,
    /// False for ringtones, notification sounds and other non-music audio.
    pub is_music: bool,
}

impl From<MediaRow> for Song {
    fn from(row: MediaRow) -> Self {
        Self {
            title: row.title.unwrap_or_default(),
            artist: row.artist.unwrap_or_default(),
            path: row.path,
        }
    }
}
