//! Passfoto WASM - WebAssembly bindings for Passfoto
//!
//! This crate exposes the passfoto-core crop/export engine to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - The stateful [`PhotoEditor`] binding (load, gestures,
//!   zoom, render, export)
//! - `format` - Format catalog queries and info-panel labels
//! - `types` - WASM-compatible pixel-buffer wrapper
//!
//! # Usage
//!
//! ```typescript
//! import init, { PhotoEditor } from '@passfoto/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new PhotoEditor();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! editor.load_image(bytes);
//! console.log(`Zoom: ${editor.zoom_percent}%`);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod format;
mod types;

// Re-export public types
pub use editor::PhotoEditor;
pub use format::{format_ids, preset_info};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
