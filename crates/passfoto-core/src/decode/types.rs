//! Core types for upload validation and image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted upload size in bytes (1 KB).
pub const MIN_UPLOAD_BYTES: usize = 1024;

/// Maximum accepted upload size in bytes (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors for uploads rejected before any decoding is attempted.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The bytes are not a supported image media type.
    #[error("Unsupported media type; expected an image file (JPG, PNG, GIF, WebP)")]
    UnsupportedMediaType,

    /// The upload exceeds the accepted size band.
    #[error("File too large: {actual} bytes exceeds the 10 MB limit")]
    TooLarge { actual: usize },

    /// The upload is below the accepted size band.
    #[error("File too small: {actual} bytes is below the 1 KB minimum")]
    TooSmall { actual: usize },
}

/// Errors for uploads that pass validation but cannot be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The image bytes are corrupt or unreadable.
    #[error("Corrupted or unreadable image data: {0}")]
    Unreadable(String),

    /// Decoding succeeded but produced no pixels.
    #[error("Decoded image has no pixels")]
    Empty,
}

/// Resampling filter for raster scaling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleFilter {
    /// Nearest neighbor (fastest, lowest quality).
    Nearest,
    /// Bilinear (fast, acceptable quality) — used for previews.
    #[default]
    Bilinear,
    /// Lanczos3 (slower, highest quality) — used for export.
    Lanczos3,
}

impl SampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            SampleFilter::Nearest => image::imageops::FilterType::Nearest,
            SampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            SampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An RGB pixel raster: decoded uploads, preview frames, and export output.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new raster from dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 3) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a raster filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a raster from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Read the RGB value at a pixel position. Panics if out of bounds.
    pub fn pixel_at(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * self.width + x) * 3) as usize;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
