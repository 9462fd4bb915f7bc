//! Passfoto Core - Passport-photo crop and export engine
//!
//! This crate provides the core functionality for Passfoto: the format
//! catalog, upload validation and decoding, the interactive zoom/pan/crop
//! transform, preview compositing, and pixel-exact export.
//!
//! The engine guarantees that what is displayed is exactly what is
//! exported: the preview and the export raster are both derived from the
//! same view transform and crop rectangle, with the export sampling the
//! source image directly.

pub mod crop;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod export;
pub mod format;
pub mod render;
pub mod view;

pub use crop::{Corner, CropBox};
pub use decode::{Raster, SampleFilter};
pub use editor::{Editor, EditorError, Gesture};
pub use export::export_raster;
pub use format::{FormatCatalog, FormatError, FormatId, FormatSpec};
pub use render::render_preview;
pub use view::ViewTransform;
