use std::path::Path;

use lofty::file::TaggedFile;
use lofty::picture::PictureType;
use lofty::prelude::*;
use tracing::{debug, warn};

use super::{Cover, CoverArt, CoverError};

/// Load the cover to show for `path`.
///
/// Falls back to the placeholder when the file has no picture or anything
/// goes wrong; failures are only logged.
pub fn load_cover(path: &Path) -> Cover {
    match read_cover(path) {
        Ok(Some(art)) => Cover::Art(art),
        Ok(None) => {
            debug!(path = %path.display(), "no embedded picture");
            Cover::Placeholder
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cover extraction failed");
            Cover::Placeholder
        }
    }
}

fn read_cover(path: &Path) -> Result<Option<CoverArt>, CoverError> {
    // The file is only open for the duration of this call.
    let tagged = lofty::read_from_path(path)?;
    match embedded_picture(&tagged) {
        Some(bytes) => Ok(Some(CoverArt::decode(bytes)?)),
        None => Ok(None),
    }
}

/// Front cover first, then any picture; primary tag before the others.
fn embedded_picture(tagged: &TaggedFile) -> Option<&[u8]> {
    let tags = || tagged.primary_tag().into_iter().chain(tagged.tags());

    tags()
        .flat_map(|tag| tag.pictures())
        .find(|pic| pic.pic_type() == PictureType::CoverFront)
        .or_else(|| tags().flat_map(|tag| tag.pictures()).next())
        .map(|pic| pic.data())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::write_wav;
    use image::{ImageFormat, Rgb, RgbImage};
    use lofty::config::WriteOptions;
    use lofty::picture::{MimeType, Picture};
    use lofty::tag::{Tag, TagType};
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png(color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 4, Rgb(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn tagged_wav(path: &Path, pictures: &[(PictureType, [u8; 3])]) {
        write_wav(path, 1, 8_000);
        let mut tag = Tag::new(TagType::Id3v2);
        for (pic_type, color) in pictures {
            tag.push_picture(Picture::new_unchecked(
                *pic_type,
                Some(MimeType::Png),
                None,
                png(*color),
            ));
        }
        tag.save_to_path(path, WriteOptions::default()).unwrap();
    }

    fn top_left(cover: &Cover) -> [u8; 3] {
        match cover {
            Cover::Art(art) => art.fitted(art.width(), art.height()).get_pixel(0, 0).0,
            Cover::Placeholder => panic!("expected art, got the placeholder"),
        }
    }

    #[test]
    fn front_cover_wins_over_earlier_pictures() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("song.wav");
        tagged_wav(
            &path,
            &[
                (PictureType::Other, [0, 255, 0]),
                (PictureType::CoverFront, [255, 0, 0]),
            ],
        );

        let cover = load_cover(&path);
        assert_eq!(top_left(&cover), [255, 0, 0]);
        if let Cover::Art(art) = &cover {
            assert_eq!((art.width(), art.height()), (4, 4));
        }
    }

    #[test]
    fn any_picture_is_used_without_a_front_cover() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("song.wav");
        tagged_wav(&path, &[(PictureType::Other, [0, 255, 0])]);

        assert_eq!(top_left(&load_cover(&path)), [0, 255, 0]);
    }

    #[test]
    fn tagged_file_without_pictures_shows_placeholder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("song.wav");
        tagged_wav(&path, &[]);

        assert_eq!(load_cover(&path), Cover::Placeholder);
    }

    #[test]
    fn undecodable_picture_shows_placeholder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("song.wav");
        write_wav(&path, 1, 8_000);
        let mut tag = Tag::new(TagType::Id3v2);
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Png),
            None,
            b"not a png".to_vec(),
        ));
        tag.save_to_path(&path, WriteOptions::default()).unwrap();

        assert_eq!(load_cover(&path), Cover::Placeholder);
    }

    #[test]
    fn missing_file_shows_placeholder() {
        let dir = tempdir().unwrap();
        assert_eq!(
            load_cover(&dir.path().join("gone.mp3")),
            Cover::Placeholder
        );
    }

    #[test]
    fn unreadable_audio_shows_placeholder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.mp3");
        fs::write(&path, b"definitely not an mp3 frame").unwrap();
        assert_eq!(load_cover(&path), Cover::Placeholder);
    }

    #[test]
    fn directory_path_shows_placeholder() {
        let dir = tempdir().unwrap();
        assert_eq!(load_cover(dir.path()), Cover::Placeholder);
    }
}
