//! WASM bindings for the format catalog.
//!
//! The UI's info panel and radio controls read preset data through these
//! bindings; the active format (including edited custom parameters) is
//! read through [`crate::PhotoEditor`] instead.

use passfoto_core::{FormatCatalog, FormatId};
use wasm_bindgen::prelude::*;

use crate::PhotoEditor;

/// The format ids in catalog order ("napa", "heslb", "custom").
#[wasm_bindgen]
pub fn format_ids() -> Vec<String> {
    [FormatId::Napa, FormatId::Heslb, FormatId::Custom]
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

/// A preset's default spec, serialized for JavaScript.
///
/// Returns `{ name, mm_width, mm_height, px_width, px_height,
/// max_file_size_kb }`.
#[wasm_bindgen]
pub fn preset_info(name: &str) -> Result<JsValue, JsValue> {
    let id = FormatId::parse(name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown format: {name}")))?;
    let catalog = FormatCatalog::new();
    serde_wasm_bindgen::to_value(catalog.spec(id)).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
impl PhotoEditor {
    /// The active format's spec, serialized for JavaScript.
    pub fn format_info(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner().spec())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Info-panel label, e.g. "NAPA Format (30mm × 30mm)"
    #[wasm_bindgen(getter)]
    pub fn physical_label(&self) -> String {
        self.inner().spec().physical_label()
    }

    /// Info-panel label, e.g. "300 × 300 px"
    #[wasm_bindgen(getter)]
    pub fn dimensions_label(&self) -> String {
        self.inner().spec().dimensions_label()
    }

    /// Info-panel label, e.g. "~500 KB"
    #[wasm_bindgen(getter)]
    pub fn file_size_label(&self) -> String {
        self.inner().spec().file_size_label()
    }
}


/// WASM-specific tests for the JsValue-returning bindings.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_preset_info_known() {
        assert!(preset_info("napa").is_ok());
        assert!(preset_info("heslb").is_ok());
        assert!(preset_info("custom").is_ok());
    }

    #[wasm_bindgen_test]
    fn test_preset_info_unknown() {
        assert!(preset_info("polaroid").is_err());
    }

    #[wasm_bindgen_test]
    fn test_format_info_reflects_custom_edits() {
        let mut editor = PhotoEditor::new();
        editor.set_format("custom").unwrap();
        editor.set_custom_format(40, 50, 600).unwrap();
        assert!(editor.format_info().is_ok());
    }
}
