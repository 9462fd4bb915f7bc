//! Export encoding: JPEG bytes and download file names.

mod filename;
mod jpeg;

pub use filename::export_file_name;
pub use jpeg::{encode_jpeg, EncodeError, EXPORT_JPEG_QUALITY};
