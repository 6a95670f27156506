use image::RgbImage;
use image::imageops::FilterType;

use super::CoverError;

/// Longest edge kept after decoding; the panel never needs more.
const THUMBNAIL_EDGE: u32 = 128;

/// A decoded cover, reduced to a small RGB thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverArt {
    image: RgbImage,
}

impl CoverArt {
    /// Decode picture bytes in any supported format.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoverError> {
        let decoded = image::load_from_memory(bytes)?;
        let image = if decoded.width() > THUMBNAIL_EDGE || decoded.height() > THUMBNAIL_EDGE {
            decoded.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgb8()
        } else {
            decoded.to_rgb8()
        };
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Resample to fit inside `max_w` x `max_h` pixels, keeping the aspect ratio.
    pub fn fitted(&self, max_w: u32, max_h: u32) -> RgbImage {
        let (w, h) = (self.width().max(1), self.height().max(1));
        let scale = f64::min(f64::from(max_w) / f64::from(w), f64::from(max_h) / f64::from(h));
        let out_w = ((f64::from(w) * scale).round() as u32).clamp(1, max_w.max(1));
        let out_h = ((f64::from(h) * scale).round() as u32).clamp(1, max_h.max(1));
        image::imageops::resize(&self.image, out_w, out_h, FilterType::Triangle)
    }
}
