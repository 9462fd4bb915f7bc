//! The transform & crop engine.
//!
//! [`Editor`] owns the loaded image, the view transform, the crop
//! rectangle, and the gesture state machine, and exposes the full input
//! surface the UI collaborator drives: image load, format selection,
//! pointer/wheel events, zoom commands, preview rendering, and export.
//!
//! Every operation is synchronous and handled to completion; the UI
//! re-renders after each mutating call. Decoding is the caller's
//! asynchronous boundary — the engine only ever sees finished rasters
//! (or raw bytes through [`Editor::load_image_bytes`], which decodes
//! inline).

use thiserror::Error;

use crate::crop::{Corner, CropBox};
use crate::decode::{self, DecodeError, Raster, SampleFilter, UploadError};
use crate::encode::{self, EncodeError};
use crate::export::export_raster;
use crate::format::{FormatCatalog, FormatError, FormatId, FormatSpec};
use crate::render::render_preview;
use crate::view::{
    ViewTransform, BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
};

/// Errors surfaced to the UI collaborator.
///
/// All are recoverable-by-user: the offending operation is rejected and
/// prior valid state is left untouched.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Export or a zoom/reset command was requested with nothing uploaded.
    #[error("Please upload an image first")]
    NoImageLoaded,

    /// The upload failed validation before decoding.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The upload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A custom format parameter was out of range.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Export encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// What the current pointer sequence is manipulating.
///
/// Exists only for the duration of a gesture; pointer-up restores
/// [`Gesture::Idle`] unconditionally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// A corner handle drag resizing the crop rectangle.
    Resizing(Corner),
    /// Translating the crop rectangle; grab point relative to its origin.
    DraggingCrop { grab_x: f64, grab_y: f64 },
    /// Panning the image; grab point relative to the image offset.
    DraggingImage { grab_x: f64, grab_y: f64 },
}

/// The transform & crop engine.
#[derive(Debug, Clone)]
pub struct Editor {
    catalog: FormatCatalog,
    format: FormatId,
    image: Option<Raster>,
    view: ViewTransform,
    crop: CropBox,
    gesture: Gesture,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an engine with the preset catalog and no image loaded.
    pub fn new() -> Self {
        Self {
            catalog: FormatCatalog::new(),
            format: FormatId::default(),
            image: None,
            view: ViewTransform::default(),
            crop: CropBox::default(),
            gesture: Gesture::Idle,
        }
    }

    /// The active format's spec.
    pub fn spec(&self) -> &FormatSpec {
        self.catalog.spec(self.format)
    }

    /// The active format id.
    pub fn format_id(&self) -> FormatId {
        self.format
    }

    /// The format catalog.
    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    /// Whether an image is currently loaded.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// The loaded image, if any.
    pub fn image(&self) -> Option<&Raster> {
        self.image.as_ref()
    }

    /// The current view transform.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// The current crop rectangle (zero-sized while uninitialized).
    pub fn crop_box(&self) -> CropBox {
        self.crop
    }

    /// The current gesture state.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Zoom readout as a rounded percentage.
    pub fn zoom_percent(&self) -> u32 {
        self.view.zoom_percent()
    }

    /// Validate, decode, and load an uploaded file.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        decode::validate_upload(bytes)?;
        let raster = decode::decode_upload(bytes)?;
        self.load_raster(raster);
        Ok(())
    }

    /// Accept a decoded raster as the new image.
    ///
    /// Runs the cover-fit against the current format and resets the crop
    /// rectangle to uninitialized; it is lazily recomputed on next render.
    pub fn load_raster(&mut self, raster: Raster) {
        let spec = self.catalog.spec(self.format);
        let (frame_w, frame_h) = (spec.px_width, spec.px_height);
        self.view = ViewTransform::cover_fit(raster.width, raster.height, frame_w, frame_h);
        self.crop = CropBox::default();
        self.gesture = Gesture::Idle;
        self.image = Some(raster);
    }

    /// Switch the active format.
    ///
    /// The crop rectangle resets to uninitialized so it is recomputed for
    /// the new aspect ratio; the view transform is kept.
    pub fn set_format(&mut self, id: FormatId) {
        if id != self.format {
            self.format = id;
            self.crop = CropBox::default();
        }
    }

    /// Update the custom format's parameters.
    ///
    /// On error the prior valid custom spec is retained. When the custom
    /// format is active, the crop rectangle resets so it picks up the new
    /// aspect ratio.
    pub fn set_custom_format(
        &mut self,
        mm_width: u32,
        mm_height: u32,
        max_file_size_kb: u32,
    ) -> Result<(), EditorError> {
        self.catalog
            .set_custom(mm_width, mm_height, max_file_size_kb)?;
        if self.format == FormatId::Custom {
            self.crop = CropBox::default();
        }
        Ok(())
    }

    /// Begin a pointer sequence.
    ///
    /// Resolution priority: corner handle, then crop-rectangle interior,
    /// then the image itself. A no-op with no image loaded.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.image.is_none() {
            return;
        }
        self.ensure_crop_box();

        if let Some(corner) = self.crop.corner_under_point(x, y) {
            self.gesture = Gesture::Resizing(corner);
        } else if self.crop.contains(x, y) {
            self.gesture = Gesture::DraggingCrop {
                grab_x: x - self.crop.x,
                grab_y: y - self.crop.y,
            };
        } else {
            self.gesture = Gesture::DraggingImage {
                grab_x: x - self.view.offset_x,
                grab_y: y - self.view.offset_y,
            };
        }
    }

    /// Continue the active pointer sequence.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.image.is_none() {
            return;
        }
        let (frame_w, frame_h) = self.frame_size();

        match self.gesture {
            Gesture::Resizing(corner) => {
                let aspect = self.spec().aspect_ratio();
                self.crop.resize_from_corner(corner, x, aspect);
                self.crop.clamp_to_frame(frame_w, frame_h);
            }
            Gesture::DraggingCrop { grab_x, grab_y } => {
                self.crop.x = x - grab_x;
                self.crop.y = y - grab_y;
                self.crop.clamp_origin(frame_w, frame_h);
            }
            Gesture::DraggingImage { grab_x, grab_y } => {
                // Panning out of frame is allowed; export samples image
                // space, so it stays well-defined
                self.view.offset_x = x - grab_x;
                self.view.offset_y = y - grab_y;
            }
            Gesture::Idle => {}
        }
    }

    /// End the pointer sequence.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Wheel zoom anchored at the pointer position.
    ///
    /// A positive `delta_y` (scroll down) zooms out. A no-op with no
    /// image loaded.
    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) {
        if self.image.is_none() {
            return;
        }
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.view.zoom_at(factor, x, y);
    }

    /// Button zoom-in (+20 %) anchored at the canvas center.
    pub fn zoom_in(&mut self) -> Result<(), EditorError> {
        self.zoom_about_center(BUTTON_ZOOM_IN)
    }

    /// Button zoom-out (−20 %) anchored at the canvas center.
    pub fn zoom_out(&mut self) -> Result<(), EditorError> {
        self.zoom_about_center(BUTTON_ZOOM_OUT)
    }

    fn zoom_about_center(&mut self, factor: f64) -> Result<(), EditorError> {
        if self.image.is_none() {
            return Err(EditorError::NoImageLoaded);
        }
        let (frame_w, frame_h) = self.frame_size();
        self.view.zoom_at(factor, frame_w / 2.0, frame_h / 2.0);
        Ok(())
    }

    /// Rerun the cover-fit against the current format.
    ///
    /// The crop rectangle is left untouched.
    pub fn reset_zoom(&mut self) -> Result<(), EditorError> {
        let image = self.image.as_ref().ok_or(EditorError::NoImageLoaded)?;
        let spec = self.catalog.spec(self.format);
        self.view =
            ViewTransform::cover_fit(image.width, image.height, spec.px_width, spec.px_height);
        Ok(())
    }

    /// Clear the image and restore every default, including the format
    /// selection and the custom format's parameters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// CSS cursor name for the pointer position, for hover feedback.
    pub fn cursor_hint(&self, x: f64, y: f64) -> &'static str {
        if self.image.is_none() {
            return "default";
        }
        match self.gesture {
            Gesture::Resizing(corner) => corner.cursor(),
            Gesture::DraggingCrop { .. } => "move",
            Gesture::DraggingImage { .. } => "grabbing",
            Gesture::Idle => {
                if self.crop.is_unset() {
                    "grab"
                } else if let Some(corner) = self.crop.corner_under_point(x, y) {
                    corner.cursor()
                } else if self.crop.contains(x, y) {
                    "move"
                } else {
                    "grab"
                }
            }
        }
    }

    /// Composite the preview frame for the current state.
    ///
    /// Lazily initializes the crop rectangle when an image is loaded and
    /// the rectangle is still unset.
    pub fn render(&mut self) -> Raster {
        if self.image.is_some() {
            self.ensure_crop_box();
        }
        render_preview(self.spec(), self.image.as_ref(), &self.view, &self.crop)
    }

    /// Produce the export raster, exactly `px_width × px_height`.
    ///
    /// Never mutates engine state: an uninitialized crop rectangle is
    /// evaluated at its lazy default without being stored.
    pub fn export(&self) -> Result<Raster, EditorError> {
        let image = self.image.as_ref().ok_or(EditorError::NoImageLoaded)?;
        let spec = self.catalog.spec(self.format);
        let crop = self.effective_crop_box();
        Ok(export_raster(
            image,
            spec,
            &self.view,
            &crop,
            SampleFilter::Lanczos3,
        ))
    }

    /// Export and encode to JPEG bytes at the export quality.
    pub fn export_jpeg(&self) -> Result<Vec<u8>, EditorError> {
        let raster = self.export()?;
        Ok(encode::encode_jpeg(&raster, encode::EXPORT_JPEG_QUALITY)?)
    }

    /// Download file name for an export stamped at `timestamp_ms`.
    pub fn export_file_name(&self, timestamp_ms: u64) -> String {
        encode::export_file_name(&self.spec().name, timestamp_ms)
    }

    fn frame_size(&self) -> (f64, f64) {
        let spec = self.catalog.spec(self.format);
        (spec.px_width as f64, spec.px_height as f64)
    }

    /// The crop rectangle, falling back to the lazy default when unset.
    fn effective_crop_box(&self) -> CropBox {
        if self.crop.is_unset() {
            let (frame_w, frame_h) = self.frame_size();
            CropBox::centered_default(frame_w, frame_h, self.spec().aspect_ratio())
        } else {
            self.crop
        }
    }

    fn ensure_crop_box(&mut self) {
        if self.crop.is_unset() {
            self.crop = self.effective_crop_box();
        }
    }
}
