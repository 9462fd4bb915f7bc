//! WASM-compatible wrapper types for pixel buffers.
//!
//! This module provides the JavaScript-friendly raster type handed across
//! the boundary for preview frames and export output.

use passfoto_core::Raster;
use wasm_bindgen::prelude::*;

/// A pixel raster wrapper for JavaScript.
///
/// Wraps the core RGB raster type (3 bytes per pixel, row-major order).
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` and
/// `rgba_pixels()` copy into JavaScript memory as a `Uint8Array`; call
/// `free()` to release WASM memory immediately, or let wasm-bindgen's
/// finalizer handle it.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    /// Get the raster width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data (alpha 255) as Uint8Array.
    ///
    /// This is the layout `ImageData` expects, so a preview frame can be
    /// blitted with `putImageData` without a conversion loop in JS.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            out.extend_from_slice(rgb);
            out.push(255);
        }
        out
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    /// Create a JsRaster from a core raster.
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }
}
