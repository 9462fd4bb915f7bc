//! WASM bindings for the crop/export engine.
//!
//! [`PhotoEditor`] wraps the core engine in a stateful binding the
//! JavaScript UI drives directly: the DOM event handlers stay thin
//! adapters that forward canvas-relative coordinates and read back the
//! frame to blit.
//!
//! # Usage
//!
//! ```typescript
//! import { PhotoEditor } from '@passfoto/wasm';
//!
//! const editor = new PhotoEditor();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! editor.load_image(bytes);
//!
//! canvas.width = editor.frame_width;
//! canvas.height = editor.frame_height;
//! const frame = editor.render();
//! ctx.putImageData(new ImageData(
//!   new Uint8ClampedArray(frame.rgba_pixels()), frame.width, frame.height
//! ), 0, 0);
//! ```

use passfoto_core::{Editor, FormatId};
use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

/// The stateful editor binding.
#[wasm_bindgen]
pub struct PhotoEditor {
    inner: Editor,
}

impl Default for PhotoEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoEditor {
    /// Core engine access for sibling binding modules.
    pub(crate) fn inner(&self) -> &Editor {
        &self.inner
    }
}

#[wasm_bindgen]
impl PhotoEditor {
    /// Create an editor with the preset catalog and no image loaded.
    #[wasm_bindgen(constructor)]
    pub fn new() -> PhotoEditor {
        PhotoEditor {
            inner: Editor::new(),
        }
    }

    /// Validate, decode, and load an uploaded file.
    ///
    /// # Errors
    ///
    /// Returns an error string if the bytes are not a supported image
    /// media type, fall outside the 1 KB - 10 MB band, or cannot be
    /// decoded. The previously loaded image (if any) is kept.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .load_image_bytes(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Select a format by id ("napa", "heslb", "custom").
    pub fn set_format(&mut self, name: &str) -> Result<(), JsValue> {
        let id = FormatId::parse(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown format: {name}")))?;
        self.inner.set_format(id);
        Ok(())
    }

    /// Update the custom format's millimetre dimensions and file-size
    /// target. Rejected values leave the prior valid spec untouched.
    pub fn set_custom_format(
        &mut self,
        mm_width: u32,
        mm_height: u32,
        max_file_size_kb: u32,
    ) -> Result<(), JsValue> {
        self.inner
            .set_custom_format(mm_width, mm_height, max_file_size_kb)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Begin a pointer sequence at canvas coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(x, y);
    }

    /// Continue the active pointer sequence.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(x, y);
    }

    /// End the pointer sequence.
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    /// Wheel zoom anchored at the pointer; positive `delta_y` zooms out.
    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) {
        self.inner.wheel(delta_y, x, y);
    }

    /// Button zoom-in (+20 %) anchored at the canvas center.
    pub fn zoom_in(&mut self) -> Result<(), JsValue> {
        self.inner
            .zoom_in()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Button zoom-out (−20 %) anchored at the canvas center.
    pub fn zoom_out(&mut self) -> Result<(), JsValue> {
        self.inner
            .zoom_out()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Refit the image to the frame, leaving the crop rectangle alone.
    pub fn reset_zoom(&mut self) -> Result<(), JsValue> {
        self.inner
            .reset_zoom()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Clear the image and restore all defaults.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Whether an image is currently loaded
    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// The active format id ("napa", "heslb", "custom")
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format_id().as_str().to_string()
    }

    /// Preview/export frame width in pixels (canvas sizing)
    #[wasm_bindgen(getter)]
    pub fn frame_width(&self) -> u32 {
        self.inner.spec().px_width
    }

    /// Preview/export frame height in pixels (canvas sizing)
    #[wasm_bindgen(getter)]
    pub fn frame_height(&self) -> u32 {
        self.inner.spec().px_height
    }

    /// Zoom readout as a rounded percentage
    #[wasm_bindgen(getter)]
    pub fn zoom_percent(&self) -> u32 {
        self.inner.zoom_percent()
    }

    /// CSS cursor name for the pointer position.
    pub fn cursor_hint(&self, x: f64, y: f64) -> String {
        self.inner.cursor_hint(x, y).to_string()
    }

    /// Composite the preview frame for the current state.
    pub fn render(&mut self) -> JsRaster {
        JsRaster::from_raster(self.inner.render())
    }

    /// Produce the export raster, exactly `px_width × px_height`.
    pub fn export(&self) -> Result<JsRaster, JsValue> {
        self.inner
            .export()
            .map(JsRaster::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export and encode to JPEG bytes at the export quality.
    pub fn export_jpeg(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_jpeg()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Download file name for an export stamped with the current time.
    pub fn export_file_name(&self) -> String {
        self.inner.export_file_name(js_sys::Date::now() as u64)
    }

    /// Download file name for an export stamped at `timestamp_ms`.
    pub fn export_file_name_at(&self, timestamp_ms: f64) -> String {
        self.inner.export_file_name(timestamp_ms as u64)
    }
}
