use tracing::info;

use super::LibraryError;
use super::index::MediaIndex;
use super::model::Song;

/// Query `index` for music and build the song list in cursor order.
///
/// Non-music rows are dropped; missing titles or artists become empty strings.
/// The cursor is closed on every exit path, including a failed row read.
pub fn list_music<I>(index: &I) -> Result<Vec<Song>, LibraryError>
where
    I: MediaIndex + ?Sized,
{
    let cursor = index.query()?;

    let mut songs = Vec::new();
    for row in cursor {
        let row = row?;
        if row.is_music {
            songs.push(Song::from(row));
        }
    }

    info!(count = songs.len(), "song list populated");
    Ok(songs)
}
