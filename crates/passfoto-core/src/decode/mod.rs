//! Upload validation and image decoding for Passfoto.
//!
//! This module provides functionality for:
//! - Validating browser uploads (media type sniffing, size band)
//! - Decoding JPEG/PNG/GIF/WebP images to RGB rasters
//! - EXIF orientation correction
//!
//! # Architecture
//!
//! Decoding is the only asynchronous boundary in the system: the UI
//! collaborator reads the file (FileReader / ArrayBuffer) and hands the
//! bytes over; everything here is synchronous and single-threaded within
//! WASM. The engine is never queried for dimensions until decoding has
//! completed and produced a [`Raster`].

mod types;
mod upload;

pub use types::{
    DecodeError, Orientation, Raster, SampleFilter, UploadError, MAX_UPLOAD_BYTES,
    MIN_UPLOAD_BYTES,
};
pub use upload::{decode_upload, get_orientation, validate_upload};
