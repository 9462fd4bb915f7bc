//! Preview frame compositor.
//!
//! Produces the frame the UI blits to its canvas: neutral background, the
//! image drawn through the view transform, a 50 % dim outside the crop
//! rectangle, and the crop border with its corner handles. The compositor
//! is a pure function of the engine state; the browser's layered
//! fill/clear/clip drawing collapses into a single scanline pass here.

use crate::crop::{Corner, CropBox, HANDLE_SIZE};
use crate::decode::Raster;
use crate::format::FormatSpec;
use crate::view::ViewTransform;

/// Neutral frame background (#f8fafc).
pub const BACKGROUND: [u8; 3] = [248, 250, 252];

/// Crop border and handle fill (#667eea).
pub const ACCENT: [u8; 3] = [102, 126, 234];

/// Handle border color.
pub const HANDLE_BORDER: [u8; 3] = [255, 255, 255];

/// Opacity of the black overlay outside the crop rectangle.
pub const OVERLAY_ALPHA: f64 = 0.5;

/// Stroke width of the crop border and handle borders, in canvas pixels.
pub const BORDER_WIDTH: f64 = 2.0;

/// Composite a preview frame sized `px_width × px_height`.
///
/// With no image loaded the frame is the plain background. The crop
/// overlay is drawn only when the crop rectangle has been initialized;
/// the engine guarantees that before rendering with an image present.
pub fn render_preview(
    spec: &FormatSpec,
    image: Option<&Raster>,
    view: &ViewTransform,
    crop: &CropBox,
) -> Raster {
    let frame_w = spec.px_width;
    let frame_h = spec.px_height;
    let mut out = Raster::filled(frame_w, frame_h, BACKGROUND);

    let Some(img) = image else {
        return out;
    };

    let scaled_w = img.width as f64 * view.zoom;
    let scaled_h = img.height as f64 * view.zoom;
    let overlay = !crop.is_unset();

    for y in 0..frame_h {
        // Sample at pixel centers
        let cy = y as f64 + 0.5;
        for x in 0..frame_w {
            let cx = x as f64 + 0.5;

            let mut color = BACKGROUND;
            let in_image = cx >= view.offset_x
                && cx < view.offset_x + scaled_w
                && cy >= view.offset_y
                && cy < view.offset_y + scaled_h;
            if in_image {
                let sx = (cx - view.offset_x) / view.zoom - 0.5;
                let sy = (cy - view.offset_y) / view.zoom - 0.5;
                color = sample_bilinear(img, sx, sy);
            }

            if overlay {
                if let Some(chrome) = chrome_color(crop, cx, cy) {
                    color = chrome;
                } else if !crop.contains(cx, cy) {
                    color = dim(color);
                }
            }

            let idx = ((y * frame_w + x) * 3) as usize;
            out.pixels[idx..idx + 3].copy_from_slice(&color);
        }
    }

    out
}

/// Color of the crop chrome (handles, then border) at a point, if any.
fn chrome_color(crop: &CropBox, cx: f64, cy: f64) -> Option<[u8; 3]> {
    // Handles draw over the border
    let half = HANDLE_SIZE / 2.0;
    for corner in [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se] {
        let (px, py) = crop.corner_point(corner);
        let dx = (cx - px).abs();
        let dy = (cy - py).abs();
        if dx <= half && dy <= half {
            let edge_distance = half - dx.max(dy);
            return Some(if edge_distance <= BORDER_WIDTH / 2.0 {
                HANDLE_BORDER
            } else {
                ACCENT
            });
        }
    }

    if on_border(crop, cx, cy) {
        return Some(ACCENT);
    }
    None
}

/// [`BORDER_WIDTH`] stroke centered on the rectangle edges.
fn on_border(crop: &CropBox, cx: f64, cy: f64) -> bool {
    let half = BORDER_WIDTH / 2.0;
    let in_outer = cx >= crop.x - half
        && cx <= crop.right() + half
        && cy >= crop.y - half
        && cy <= crop.bottom() + half;
    let in_inner = cx > crop.x + half
        && cx < crop.right() - half
        && cy > crop.y + half
        && cy < crop.bottom() - half;
    in_outer && !in_inner
}

fn dim(color: [u8; 3]) -> [u8; 3] {
    let keep = 1.0 - OVERLAY_ALPHA;
    [
        (color[0] as f64 * keep).round() as u8,
        (color[1] as f64 * keep).round() as u8,
        (color[2] as f64 * keep).round() as u8,
    ]
}

/// Bilinear sample with edge extension.
fn sample_bilinear(img: &Raster, sx: f64, sy: f64) -> [u8; 3] {
    let max_x = (img.width - 1) as f64;
    let max_y = (img.height - 1) as f64;
    let sx = sx.clamp(0.0, max_x);
    let sy = sy.clamp(0.0, max_y);

    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let x1 = (x0 + 1).min(img.width - 1);
    let y1 = (y0 + 1).min(img.height - 1);
    let tx = sx - x0 as f64;
    let ty = sy - y0 as f64;

    let p00 = img.pixel_at(x0, y0);
    let p10 = img.pixel_at(x1, y0);
    let p01 = img.pixel_at(x0, y1);
    let p11 = img.pixel_at(x1, y1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round() as u8;
    }
    out
}
