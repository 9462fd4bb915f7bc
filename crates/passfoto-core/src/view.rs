//! The view transform: mapping source-image pixels onto the preview frame.
//!
//! The transform is a uniform scale plus a translation:
//! `canvas = offset + zoom * image`. Pan mutates the offset, zoom operations
//! scale about a pivot point so the image point under the pivot stays put.
//!
//! # Coordinate System
//!
//! - Image space: source-image pixels, origin top-left
//! - Canvas space: preview-frame pixels, origin top-left

/// Lower zoom bound for zoom operations.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound for zoom operations.
pub const MAX_ZOOM: f64 = 5.0;

/// Wheel zoom-in factor (scroll up).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Wheel zoom-out factor (scroll down).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Button zoom-in factor (+20 %).
pub const BUTTON_ZOOM_IN: f64 = 1.2;

/// Button zoom-out factor (−20 %).
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

/// Maps source-image pixel coordinates to canvas-display pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Uniform scale factor.
    pub zoom: f64,
    /// X translation in canvas pixels.
    pub offset_x: f64,
    /// Y translation in canvas pixels.
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Compute the initial fit for a freshly loaded image.
    ///
    /// Compares the image aspect ratio to the frame aspect ratio: a
    /// relatively wider image is scaled so its height fills the frame
    /// height and centered horizontally; otherwise the width fills the
    /// frame width and the image is centered vertically. The frame starts
    /// fully covered with no letterboxing on the covering axis.
    ///
    /// The zoom bounds bind zoom *operations*, not this fit: a very large
    /// source may legitimately fit below [`MIN_ZOOM`].
    pub fn cover_fit(image_w: u32, image_h: u32, frame_w: u32, frame_h: u32) -> Self {
        let image_aspect = image_w as f64 / image_h as f64;
        let frame_aspect = frame_w as f64 / frame_h as f64;

        if image_aspect > frame_aspect {
            // Image is wider - fit to height
            let zoom = frame_h as f64 / image_h as f64;
            Self {
                zoom,
                offset_x: (frame_w as f64 - image_w as f64 * zoom) / 2.0,
                offset_y: 0.0,
            }
        } else {
            // Image is taller - fit to width
            let zoom = frame_w as f64 / image_w as f64;
            Self {
                zoom,
                offset_x: 0.0,
                offset_y: (frame_h as f64 - image_h as f64 * zoom) / 2.0,
            }
        }
    }

    /// Zoom by `factor` about a pivot point, clamping to the zoom bounds.
    ///
    /// The offset is adjusted so the image point under the pivot maps to
    /// the same canvas point after the operation.
    pub fn zoom_at(&mut self, factor: f64, pivot_x: f64, pivot_y: f64) {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        let ratio = self.zoom / old_zoom;
        self.offset_x = pivot_x - (pivot_x - self.offset_x) * ratio;
        self.offset_y = pivot_y - (pivot_y - self.offset_y) * ratio;
    }

    /// Convert a canvas point to image coordinates.
    pub fn canvas_to_image(&self, canvas_x: f64, canvas_y: f64) -> (f64, f64) {
        (
            (canvas_x - self.offset_x) / self.zoom,
            (canvas_y - self.offset_y) / self.zoom,
        )
    }

    /// Convert an image point to canvas coordinates.
    pub fn image_to_canvas(&self, image_x: f64, image_y: f64) -> (f64, f64) {
        (
            image_x * self.zoom + self.offset_x,
            image_y * self.zoom + self.offset_y,
        )
    }

    /// Zoom readout as a rounded percentage.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
