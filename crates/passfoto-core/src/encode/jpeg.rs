//! JPEG encoding for export.
//!
//! Uses the `image` crate's JPEG encoder with a configurable quality
//! setting. The export workflow encodes at [`EXPORT_JPEG_QUALITY`].

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::Raster;

/// Quality used for exported photos (the tool's fixed 0.9 quality).
pub const EXPORT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the raster dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `raster` - RGB raster to encode
/// * `quality` - JPEG quality (1-100; out-of-range values are clamped)
///
/// # Errors
///
/// Returns an error if the raster has zero dimensions, its buffer length
/// is inconsistent, or the encoder fails.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: raster.width,
            height: raster.height,
        });
    }

    let expected = (raster.width as usize) * (raster.height as usize) * 3;
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
