//! Upload validation and decoding with EXIF orientation handling.
//!
//! Uploads come from a browser file picker, so the media type is sniffed
//! from the bytes rather than trusted from a filename or MIME header.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, Orientation, Raster, UploadError, MAX_UPLOAD_BYTES, MIN_UPLOAD_BYTES};

/// Validate an upload before decoding.
///
/// Rejects anything that is not a supported image media type
/// (JPEG/PNG/GIF/WebP) or whose size falls outside the 1 KB - 10 MB band.
/// Validation reads only the magic bytes; the pixels are untouched.
///
/// # Errors
///
/// Returns `UploadError::UnsupportedMediaType`, `UploadError::TooLarge`,
/// or `UploadError::TooSmall`.
pub fn validate_upload(bytes: &[u8]) -> Result<(), UploadError> {
    let format = image::guess_format(bytes).map_err(|_| UploadError::UnsupportedMediaType)?;
    match format {
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP => {}
        _ => return Err(UploadError::UnsupportedMediaType),
    }

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            actual: bytes.len(),
        });
    }
    if bytes.len() < MIN_UPLOAD_BYTES {
        return Err(UploadError::TooSmall {
            actual: bytes.len(),
        });
    }

    Ok(())
}

/// Decode an uploaded image, applying EXIF orientation correction.
///
/// Phone cameras routinely store rotated pixels plus an orientation tag,
/// so the correction must happen before the engine sees dimensions.
///
/// # Errors
///
/// Returns `DecodeError::Unreadable` if the bytes cannot be decoded and
/// `DecodeError::Empty` if decoding produces a zero-sized image.
pub fn decode_upload(bytes: &[u8]) -> Result<Raster, DecodeError> {
    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::Unreadable(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Unreadable(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    let raster = Raster::from_rgb_image(oriented.into_rgb8());
    if raster.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(raster)
}

/// Extract EXIF orientation from image bytes (for external use).
///
/// Returns `Orientation::Normal` if no EXIF data is found or the
/// orientation cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply an EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic per-pixel test pattern.
    fn pattern_pixel(x: u32, y: u32) -> [u8; 3] {
        [
            ((x * 7919 + y * 104_729) % 256) as u8,
            ((x * 104_729 + y * 7919) % 256) as u8,
            ((x ^ y) % 256) as u8,
        ]
    }

    /// Encode a test photo as PNG bytes. The pattern is incompressible
    /// enough to keep non-trivial fixtures above the 1 KB floor.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img =
            image::RgbImage::from_fn(width, height, |x, y| image::Rgb(pattern_pixel(x, y)));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_validate_accepts_png() {
        let bytes = png_bytes(200, 200);
        assert!(bytes.len() >= MIN_UPLOAD_BYTES, "fixture too small");
        assert!(validate_upload(&bytes).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let bytes = vec![0x00u8; 4096];
        assert!(matches!(
            validate_upload(&bytes),
            Err(UploadError::UnsupportedMediaType)
        ));
    }

    #[test]
    fn test_validate_rejects_text() {
        let bytes = b"hello, this is definitely not an image".repeat(100);
        assert!(matches!(
            validate_upload(&bytes),
            Err(UploadError::UnsupportedMediaType)
        ));
    }

    #[test]
    fn test_validate_rejects_tiny_file() {
        // Valid PNG magic but below the 1 KB floor
        let bytes = png_bytes(1, 1);
        assert!(bytes.len() < MIN_UPLOAD_BYTES);
        assert!(matches!(
            validate_upload(&bytes),
            Err(UploadError::TooSmall { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        // PNG magic followed by padding past the 10 MB ceiling
        let mut bytes = png_bytes(8, 8);
        bytes.resize(MAX_UPLOAD_BYTES + 1, 0);
        assert!(matches!(
            validate_upload(&bytes),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_decode_valid_png() {
        let bytes = png_bytes(120, 80);
        let raster = decode_upload(&bytes).unwrap();

        assert_eq!(raster.width, 120);
        assert_eq!(raster.height, 80);
        assert_eq!(raster.byte_size(), 120 * 80 * 3);
    }

    #[test]
    fn test_decode_preserves_pixels() {
        let bytes = png_bytes(16, 16);
        let raster = decode_upload(&bytes).unwrap();

        // PNG is lossless, so the pattern survives exactly
        assert_eq!(raster.pixel_at(0, 0), pattern_pixel(0, 0));
        assert_eq!(raster.pixel_at(8, 3), pattern_pixel(8, 3));
        assert_eq!(raster.pixel_at(15, 15), pattern_pixel(15, 15));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_upload(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::Unreadable(_))));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_upload(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(64, 64);
        let result = decode_upload(&bytes[0..24]);
        assert!(result.is_err());
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = png_bytes(32, 32);
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_normal() {
        let pixels = vec![
            255, 0, 0, // Red
            0, 255, 0, // Green
            0, 0, 255, // Blue
            255, 255, 0, // Yellow
        ];
        let rgb_img = image::RgbImage::from_raw(2, 2, pixels).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::Normal).into_rgb8();
        assert_eq!(result.dimensions(), (2, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        let rgb_img = image::RgbImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        let rgb_img = image::RgbImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::Rotate180).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]); // Green
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]); // Red
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        let rgb_img = image::RgbImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
