//! Export pipeline: map the crop rectangle back into source-image pixel
//! space and produce the format-sized output raster.
//!
//! The crop rectangle lives in canvas coordinates; the export samples the
//! *source image*, so panning the image out of frame still yields a
//! well-defined result. The sampled region is stretched to exactly
//! `px_width × px_height` regardless of source size or zoom level.

use crate::crop::CropBox;
use crate::decode::{Raster, SampleFilter};
use crate::format::FormatSpec;
use crate::view::ViewTransform;

/// Export canvas base color.
pub const EXPORT_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Render the export raster for the current crop and view.
///
/// The source rectangle is the crop box pulled back through the view
/// transform (`src = (crop − offset) / zoom`), clamped to the source
/// bounds: origin floored at zero, extent capped so `origin + extent`
/// stays within the image. A crop that misses the image entirely
/// degenerates to the plain white raster.
pub fn export_raster(
    image: &Raster,
    spec: &FormatSpec,
    view: &ViewTransform,
    crop: &CropBox,
    filter: SampleFilter,
) -> Raster {
    let out_w = spec.px_width;
    let out_h = spec.px_height;

    let inv = 1.0 / view.zoom;
    let src_x = ((crop.x - view.offset_x) * inv).max(0.0);
    let src_y = ((crop.y - view.offset_y) * inv).max(0.0);
    let src_w = (crop.width * inv).min(image.width as f64 - src_x);
    let src_h = (crop.height * inv).min(image.height as f64 - src_y);

    if src_w <= 0.0 || src_h <= 0.0 {
        return Raster::filled(out_w, out_h, EXPORT_BACKGROUND);
    }

    // Integer source rectangle, kept inside the image
    let x0 = (src_x.floor() as u32).min(image.width - 1);
    let y0 = (src_y.floor() as u32).min(image.height - 1);
    let region_w = (src_w.round() as u32).clamp(1, image.width - x0);
    let region_h = (src_h.round() as u32).clamp(1, image.height - y0);

    let region =
        image::RgbImage::from_fn(region_w, region_h, |x, y| {
            image::Rgb(image.pixel_at(x0 + x, y0 + y))
        });

    // Fast path: region already at output size
    if (region_w, region_h) == (out_w, out_h) {
        return Raster::from_rgb_image(region);
    }

    let stretched = image::imageops::resize(&region, out_w, out_h, filter.to_image_filter());
    Raster::from_rgb_image(stretched)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An image whose red channel encodes x/8 and green channel y/8,
    /// so sampled regions can be located.
    fn coordinate_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x / 8).min(255) as u8);
                pixels.push((y / 8).min(255) as u8);
                pixels.push(0);
            }
        }
        Raster::new(width, height, pixels)
    }

    fn napa_setup() -> (FormatSpec, ViewTransform, CropBox) {
        let spec = FormatSpec::napa();
        // 1000×1500 source, cover-fit into 300×300
        let view = ViewTransform::cover_fit(1000, 1500, 300, 300);
        let crop = CropBox::centered_default(300.0, 300.0, 1.0);
        (spec, view, crop)
    }

    #[test]
    fn test_export_dimensions_match_format() {
        let image = coordinate_image(1000, 1500);
        let (spec, view, crop) = napa_setup();

        let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Bilinear);
        assert_eq!(out.width, 300);
        assert_eq!(out.height, 300);
        assert_eq!(out.byte_size(), 300 * 300 * 3);
    }

    #[test]
    fn test_export_dimensions_for_all_formats() {
        let image = coordinate_image(800, 600);
        for spec in [
            FormatSpec::napa(),
            FormatSpec::heslb(),
            FormatSpec::custom_default(),
            FormatSpec::custom(40, 50, 500).unwrap(),
        ] {
            let view = ViewTransform::cover_fit(800, 600, spec.px_width, spec.px_height);
            let crop = CropBox::centered_default(
                spec.px_width as f64,
                spec.px_height as f64,
                spec.aspect_ratio(),
            );
            let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Bilinear);
            assert_eq!((out.width, out.height), (spec.px_width, spec.px_height));
        }
    }

    #[test]
    fn test_export_samples_expected_region() {
        let image = coordinate_image(1000, 1500);
        let (spec, view, crop) = napa_setup();

        // Fit: zoom 0.3, offset (0, -75). Crop at (30, 30) maps to source
        // origin (100, 350); crop extent 240 maps to 800.
        let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Nearest);

        // The output's top-left samples near source (100, 350): red ≈ 100/8,
        // green ≈ 350/8. Nearest-neighbor lands within the first source step.
        let [r, g, _] = out.pixel_at(0, 0);
        assert!((r as i32 - 100 / 8).abs() <= 1, "red was {}", r);
        assert!((g as i32 - 350 / 8).abs() <= 1, "green was {}", g);

        // Bottom-right samples near source (900, 1150)
        let [r, g, _] = out.pixel_at(299, 299);
        assert!((r as i32 - 900 / 8).abs() <= 1, "red was {}", r);
        assert!((g as i32 - 1150 / 8).abs() <= 1, "green was {}", g);
    }

    #[test]
    fn test_export_uniform_source_is_uniform() {
        let image = Raster::filled(640, 480, [90, 180, 30]);
        let spec = FormatSpec::heslb();
        let view = ViewTransform::cover_fit(640, 480, 120, 150);
        let crop = CropBox::centered_default(120.0, 150.0, spec.aspect_ratio());

        let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Lanczos3);
        assert_eq!(out.pixel_at(0, 0), [90, 180, 30]);
        assert_eq!(out.pixel_at(60, 75), [90, 180, 30]);
        assert_eq!(out.pixel_at(119, 149), [90, 180, 30]);
    }

    #[test]
    fn test_export_crop_missing_image_is_white() {
        let image = coordinate_image(400, 400);
        let spec = FormatSpec::napa();
        // Image panned far off to the right of the frame
        let view = ViewTransform {
            zoom: 1.0,
            offset_x: 10_000.0,
            offset_y: 0.0,
        };
        let crop = CropBox::centered_default(300.0, 300.0, 1.0);

        let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Bilinear);
        assert_eq!((out.width, out.height), (300, 300));
        assert_eq!(out.pixel_at(150, 150), EXPORT_BACKGROUND);
    }

    #[test]
    fn test_export_clamps_partially_offscreen_crop() {
        let image = coordinate_image(200, 200);
        let spec = FormatSpec::napa();
        // Zoomed in so the crop overruns the source on the bottom-right
        let view = ViewTransform {
            zoom: 2.0,
            offset_x: -250.0,
            offset_y: -250.0,
        };
        let crop = CropBox {
            x: 60.0,
            y: 60.0,
            width: 240.0,
            height: 240.0,
        };

        // Source rect: origin (155, 155), extent capped at 45
        let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Bilinear);
        assert_eq!((out.width, out.height), (300, 300));
    }

    #[test]
    fn test_export_fast_path_exact_size() {
        // Crop maps 1:1 onto the source at zoom 1
        let image = coordinate_image(300, 300);
        let spec = FormatSpec::napa();
        let view = ViewTransform::default();
        let crop = CropBox {
            x: 0.0,
            y: 0.0,
            width: 300.0,
            height: 300.0,
        };

        let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Bilinear);
        assert_eq!(out, image);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::view::{MAX_ZOOM, MIN_ZOOM};
    use proptest::prelude::*;

    proptest! {
        /// Property: export dimensions equal the format's pixel dimensions
        /// exactly, for any source size, view transform, and crop.
        #[test]
        fn prop_export_dimensions_exact(
            image_w in 50u32..=1200,
            image_h in 50u32..=1200,
            zoom in MIN_ZOOM..=MAX_ZOOM,
            offset_x in -500.0f64..=500.0,
            offset_y in -500.0f64..=500.0,
            crop_x in 0.0f64..=60.0,
            crop_y in 0.0f64..=60.0,
            crop_w in 20.0f64..=240.0,
        ) {
            let image = Raster::filled(image_w, image_h, [128, 128, 128]);
            let spec = FormatSpec::napa();
            let view = ViewTransform { zoom, offset_x, offset_y };
            let crop = CropBox {
                x: crop_x,
                y: crop_y,
                width: crop_w,
                height: crop_w, // NAPA is square
            };

            let out = export_raster(&image, &spec, &view, &crop, SampleFilter::Bilinear);
            prop_assert_eq!(out.width, spec.px_width);
            prop_assert_eq!(out.height, spec.px_height);
            prop_assert_eq!(out.byte_size(), (spec.px_width * spec.px_height * 3) as usize);
        }

        /// Property: export never mutates its inputs.
        #[test]
        fn prop_export_is_pure(
            zoom in MIN_ZOOM..=MAX_ZOOM,
            offset_x in -200.0f64..=200.0,
            offset_y in -200.0f64..=200.0,
        ) {
            let image = Raster::filled(400, 400, [10, 20, 30]);
            let image_before = image.clone();
            let spec = FormatSpec::napa();
            let view = ViewTransform { zoom, offset_x, offset_y };
            let crop = CropBox::centered_default(300.0, 300.0, 1.0);

            let _ = export_raster(&image, &spec, &view, &crop, SampleFilter::Bilinear);
            prop_assert_eq!(image, image_before);
        }
    }
}
