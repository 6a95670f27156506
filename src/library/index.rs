use std::fs;
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::LibraryError;
use super::model::MediaRow;

/// A read-only source of audio rows.
///
/// `query` hands out a cursor; dropping the cursor closes it.
pub trait MediaIndex {
    type Cursor: Iterator<Item = Result<MediaRow, LibraryError>>;

    fn query(&self) -> Result<Self::Cursor, LibraryError>;
}

/// Media index backed by a directory tree on the local filesystem.
pub struct DirectoryIndex {
    root: PathBuf,
    settings: LibrarySettings,
}

impl DirectoryIndex {
    pub fn new(root: impl Into<PathBuf>, settings: LibrarySettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }
}

impl MediaIndex for DirectoryIndex {
    type Cursor = DirectoryCursor;

    fn query(&self) -> Result<DirectoryCursor, LibraryError> {
        // Surface an unreadable root as a failed query rather than an empty list.
        fs::read_dir(&self.root).map_err(|source| LibraryError::Unavailable {
            path: self.root.clone(),
            source,
        })?;

        let walker = WalkDir::new(&self.root)
            .follow_links(self.settings.follow_links)
            .sort_by_file_name()
            .into_iter();

        Ok(DirectoryCursor {
            walker,
            root: self.root.clone(),
            extensions: normalized(&self.settings.extensions),
            non_music_dirs: normalized(&self.settings.non_music_dirs),
            include_hidden: self.settings.include_hidden,
        })
    }
}

/// Cursor over the audio files of a [`DirectoryIndex`], in file-name order.
pub struct DirectoryCursor {
    walker: walkdir::IntoIter,
    root: PathBuf,
    extensions: Vec<String>,
    non_music_dirs: Vec<String>,
    include_hidden: bool,
}

impl Iterator for DirectoryCursor {
    type Item = Result<MediaRow, LibraryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Some(Err(LibraryError::Walk(e))),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable library entry");
                    continue;
                }
            };

            if entry.depth() > 0 && !self.include_hidden && is_hidden(entry.path()) {
                if entry.file_type().is_dir() {
                    self.walker.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() || !has_extension(entry.path(), &self.extensions) {
                continue;
            }

            return Some(Ok(self.row_for(entry.path())));
        }
    }
}

impl DirectoryCursor {
    fn row_for(&self, path: &Path) -> MediaRow {
        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
        let mut artist = None;

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                        title = Some(v.to_string());
                    }
                    artist = tag
                        .artist()
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty());
                }
            }
            Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
        }

        MediaRow {
            title,
            artist,
            is_music: !self.in_non_music_dir(path),
            path: path.to_path_buf(),
        }
    }

    fn in_non_music_dir(&self, path: &Path) -> bool {
        let Some(parent) = path.parent() else {
            return false;
        };
        let relative = parent.strip_prefix(&self.root).unwrap_or(parent);
        relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|name| {
                    let name = name.to_ascii_lowercase();
                    self.non_music_dirs.iter().any(|d| *d == name)
                })
                .unwrap_or(false)
        })
    }
}

fn normalized(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::write_wav;
    use lofty::config::WriteOptions;
    use lofty::tag::{Tag, TagType};
    use std::fs;
    use tempfile::tempdir;

    fn collect(index: &DirectoryIndex) -> Vec<MediaRow> {
        index
            .query()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn has_extension_matches_configured_extensions_case_insensitive() {
        let exts = normalized(&LibrarySettings::default().extensions);
        assert!(has_extension(Path::new("/tmp/a.mp3"), &exts));
        assert!(has_extension(Path::new("/tmp/a.MP3"), &exts));
        assert!(has_extension(Path::new("/tmp/a.flac"), &exts));
        assert!(has_extension(Path::new("/tmp/a.ogg"), &exts));
        assert!(!has_extension(Path::new("/tmp/a.txt"), &exts));
        assert!(!has_extension(Path::new("/tmp/a"), &exts));
    }

    #[test]
    fn normalized_strips_dots_and_blanks() {
        let raw = vec![".MP3".to_string(), "  ".to_string(), " Ogg ".to_string()];
        assert_eq!(normalized(&raw), vec!["mp3", "ogg"]);
    }

    #[test]
    fn query_yields_audio_files_in_file_name_order_with_stem_titles() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let index = DirectoryIndex::new(dir.path(), LibrarySettings::default());
        let rows = collect(&index);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title.as_deref(), Some("a"));
        assert_eq!(rows[1].title.as_deref(), Some("b"));
        assert_eq!(rows[0].artist, None);
        assert!(rows.iter().all(|r| r.is_music));
    }

    #[test]
    fn query_flags_ringtone_directories_as_not_music() {
        let dir = tempdir().unwrap();
        let ring = dir.path().join("Ringtones");
        fs::create_dir_all(&ring).unwrap();
        fs::write(ring.join("bell.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("song.mp3"), b"not real").unwrap();

        let index = DirectoryIndex::new(dir.path(), LibrarySettings::default());
        let rows = collect(&index);

        let bell = rows.iter().find(|r| r.path.ends_with("bell.mp3")).unwrap();
        let song = rows.iter().find(|r| r.path.ends_with("song.mp3")).unwrap();
        assert!(!bell.is_music);
        assert!(song.is_music);
    }

    #[test]
    fn query_skips_hidden_entries_unless_configured() {
        let dir = tempdir().unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir_all(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inner.mp3"), b"not real").unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let index = DirectoryIndex::new(dir.path(), LibrarySettings::default());
        let rows = collect(&index);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title.as_deref(), Some("visible"));

        let settings = LibrarySettings {
            include_hidden: true,
            ..LibrarySettings::default()
        };
        let index = DirectoryIndex::new(dir.path(), settings);
        assert_eq!(collect(&index).len(), 3);
    }

    #[test]
    fn query_reads_title_and_artist_from_tags() {
        let dir = tempdir().unwrap();
        let tagged = dir.path().join("01 track.wav");
        let untitled = dir.path().join("02 untitled.wav");
        write_wav(&tagged, 1, 8_000);
        write_wav(&untitled, 1, 8_000);

        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_title("Northern Lights".to_string());
        tag.set_artist("  The Aurora Band ".to_string());
        tag.save_to_path(&tagged, WriteOptions::default()).unwrap();

        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_artist("Nameless".to_string());
        tag.save_to_path(&untitled, WriteOptions::default()).unwrap();

        let index = DirectoryIndex::new(dir.path(), LibrarySettings::default());
        let rows = collect(&index);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title.as_deref(), Some("Northern Lights"));
        assert_eq!(rows[0].artist.as_deref(), Some("The Aurora Band"));
        assert_eq!(rows[1].title.as_deref(), Some("02 untitled"));
        assert_eq!(rows[1].artist.as_deref(), Some("Nameless"));
    }

    #[test]
    fn query_fails_for_missing_root() {
        let dir = tempdir().unwrap();
        let index = DirectoryIndex::new(dir.path().join("nope"), LibrarySettings::default());
        assert!(matches!(
            index.query(),
            Err(LibraryError::Unavailable { .. })
        ));
    }
}
