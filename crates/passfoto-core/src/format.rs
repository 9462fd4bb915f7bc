//! Output format catalog: passport-photo dimension specifications.
//!
//! Two fixed presets (NAPA and HESLB) plus a user-editable custom format
//! whose pixel dimensions are derived from physical millimetres at print
//! resolution. The active format fixes the aspect ratio of the crop
//! rectangle and the exact pixel dimensions of the export raster.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Millimetre-to-pixel conversion at print resolution (11.8 px/mm ≈ 300 DPI).
pub const PX_PER_MM: f64 = 11.8;

/// Accepted custom width range in millimetres.
pub const MM_WIDTH_RANGE: RangeInclusive<u32> = 10..=100;

/// Accepted custom height range in millimetres.
pub const MM_HEIGHT_RANGE: RangeInclusive<u32> = 10..=150;

/// Accepted custom file-size target range in kilobytes.
pub const FILE_SIZE_RANGE_KB: RangeInclusive<u32> = 50..=2000;

/// Errors for custom format parameters outside the accepted ranges.
///
/// A rejected update leaves the previously valid spec untouched.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Width must be between 10mm and 100mm, got {mm}mm")]
    WidthOutOfRange { mm: u32 },

    #[error("Height must be between 10mm and 150mm, got {mm}mm")]
    HeightOutOfRange { mm: u32 },

    #[error("File size must be between 50KB and 2000KB, got {kb}KB")]
    FileSizeOutOfRange { kb: u32 },
}

/// Identifier for one of the catalog's formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatId {
    #[default]
    Napa,
    Heslb,
    Custom,
}

impl FormatId {
    /// Parse the lowercase id used by the UI ("napa", "heslb", "custom").
    pub fn parse(name: &str) -> Option<FormatId> {
        match name {
            "napa" => Some(FormatId::Napa),
            "heslb" => Some(FormatId::Heslb),
            "custom" => Some(FormatId::Custom),
            _ => None,
        }
    }

    /// The lowercase id used by the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            FormatId::Napa => "napa",
            FormatId::Heslb => "heslb",
            FormatId::Custom => "custom",
        }
    }
}

/// A passport-photo output format.
///
/// `px_width / px_height` is the fixed aspect ratio the crop rectangle
/// must match at all times, and the exact pixel size of the export raster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Display name (e.g. "NAPA Format").
    pub name: String,
    /// Physical width in millimetres.
    pub mm_width: u32,
    /// Physical height in millimetres.
    pub mm_height: u32,
    /// Export width in pixels.
    pub px_width: u32,
    /// Export height in pixels.
    pub px_height: u32,
    /// Approximate target file size in kilobytes.
    pub max_file_size_kb: u32,
}

impl FormatSpec {
    /// The NAPA preset: 30×30 mm square, 300×300 px.
    pub fn napa() -> Self {
        Self {
            name: "NAPA Format".to_string(),
            mm_width: 30,
            mm_height: 30,
            px_width: 300,
            px_height: 300,
            max_file_size_kb: 500,
        }
    }

    /// The HESLB preset: 12×15 mm, 120×150 px.
    pub fn heslb() -> Self {
        Self {
            name: "HESLB Format".to_string(),
            mm_width: 12,
            mm_height: 15,
            px_width: 120,
            px_height: 150,
            max_file_size_kb: 1000,
        }
    }

    /// The custom format's defaults: 35×45 mm, 413×531 px.
    pub fn custom_default() -> Self {
        Self {
            name: "Custom Format".to_string(),
            mm_width: 35,
            mm_height: 45,
            px_width: 413,
            px_height: 531,
            max_file_size_kb: 500,
        }
    }

    /// Build a custom format from millimetre dimensions and a file-size
    /// target, deriving pixel dimensions at [`PX_PER_MM`].
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when any parameter falls outside its
    /// accepted range.
    pub fn custom(mm_width: u32, mm_height: u32, max_file_size_kb: u32) -> Result<Self, FormatError> {
        if !MM_WIDTH_RANGE.contains(&mm_width) {
            return Err(FormatError::WidthOutOfRange { mm: mm_width });
        }
        if !MM_HEIGHT_RANGE.contains(&mm_height) {
            return Err(FormatError::HeightOutOfRange { mm: mm_height });
        }
        if !FILE_SIZE_RANGE_KB.contains(&max_file_size_kb) {
            return Err(FormatError::FileSizeOutOfRange {
                kb: max_file_size_kb,
            });
        }

        Ok(Self {
            name: "Custom Format".to_string(),
            mm_width,
            mm_height,
            px_width: (mm_width as f64 * PX_PER_MM).round() as u32,
            px_height: (mm_height as f64 * PX_PER_MM).round() as u32,
            max_file_size_kb,
        })
    }

    /// The fixed aspect ratio (width over height) in pixel space.
    pub fn aspect_ratio(&self) -> f64 {
        self.px_width as f64 / self.px_height as f64
    }

    /// Label for the format info panel, e.g. "NAPA Format (30mm × 30mm)".
    pub fn physical_label(&self) -> String {
        format!("{} ({}mm × {}mm)", self.name, self.mm_width, self.mm_height)
    }

    /// Label for the pixel dimensions, e.g. "300 × 300 px".
    pub fn dimensions_label(&self) -> String {
        format!("{} × {} px", self.px_width, self.px_height)
    }

    /// Label for the file-size target, e.g. "~500 KB".
    pub fn file_size_label(&self) -> String {
        format!("~{} KB", self.max_file_size_kb)
    }
}

/// The format catalog: the two fixed presets plus the mutable custom spec.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatCatalog {
    napa: FormatSpec,
    heslb: FormatSpec,
    custom: FormatSpec,
}

impl Default for FormatCatalog {
    fn default() -> Self {
        Self {
            napa: FormatSpec::napa(),
            heslb: FormatSpec::heslb(),
            custom: FormatSpec::custom_default(),
        }
    }
}

impl FormatCatalog {
    /// Create a catalog with the preset defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a format id to its spec.
    pub fn spec(&self, id: FormatId) -> &FormatSpec {
        match id {
            FormatId::Napa => &self.napa,
            FormatId::Heslb => &self.heslb,
            FormatId::Custom => &self.custom,
        }
    }

    /// Update the custom format.
    ///
    /// On error the prior valid custom spec is retained.
    pub fn set_custom(
        &mut self,
        mm_width: u32,
        mm_height: u32,
        max_file_size_kb: u32,
    ) -> Result<(), FormatError> {
        self.custom = FormatSpec::custom(mm_width, mm_height, max_file_size_kb)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        let napa = FormatSpec::napa();
        assert_eq!(napa.px_width, 300);
        assert_eq!(napa.px_height, 300);
        assert_eq!(napa.max_file_size_kb, 500);

        let heslb = FormatSpec::heslb();
        assert_eq!((heslb.mm_width, heslb.mm_height), (12, 15));
        assert_eq!((heslb.px_width, heslb.px_height), (120, 150));
    }

    #[test]
    fn test_aspect_ratio() {
        assert!((FormatSpec::napa().aspect_ratio() - 1.0).abs() < f64::EPSILON);
        assert!((FormatSpec::heslb().aspect_ratio() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_derives_pixels_at_print_dpi() {
        let spec = FormatSpec::custom(40, 50, 500).unwrap();
        assert_eq!(spec.px_width, 472); // round(40 * 11.8)
        assert_eq!(spec.px_height, 590); // round(50 * 11.8)
    }

    #[test]
    fn test_custom_default_matches_derivation() {
        let default = FormatSpec::custom_default();
        let derived = FormatSpec::custom(35, 45, 500).unwrap();
        assert_eq!(default, derived);
    }

    #[test]
    fn test_custom_rejects_width_below_floor() {
        let result = FormatSpec::custom(5, 45, 500);
        assert!(matches!(result, Err(FormatError::WidthOutOfRange { mm: 5 })));
    }

    #[test]
    fn test_custom_rejects_out_of_range_parameters() {
        assert!(FormatSpec::custom(101, 45, 500).is_err());
        assert!(FormatSpec::custom(35, 9, 500).is_err());
        assert!(FormatSpec::custom(35, 151, 500).is_err());
        assert!(FormatSpec::custom(35, 45, 49).is_err());
        assert!(FormatSpec::custom(35, 45, 2001).is_err());
    }

    #[test]
    fn test_custom_accepts_range_endpoints() {
        assert!(FormatSpec::custom(10, 10, 50).is_ok());
        assert!(FormatSpec::custom(100, 150, 2000).is_ok());
    }

    #[test]
    fn test_catalog_retains_prior_custom_on_rejection() {
        let mut catalog = FormatCatalog::new();
        catalog.set_custom(40, 50, 600).unwrap();

        let result = catalog.set_custom(5, 50, 600);
        assert!(result.is_err());

        let spec = catalog.spec(FormatId::Custom);
        assert_eq!(spec.mm_width, 40);
        assert_eq!(spec.px_width, 472);
    }

    #[test]
    fn test_format_id_parse_round_trip() {
        for id in [FormatId::Napa, FormatId::Heslb, FormatId::Custom] {
            assert_eq!(FormatId::parse(id.as_str()), Some(id));
        }
        assert_eq!(FormatId::parse("passport"), None);
    }

    #[test]
    fn test_info_labels() {
        let napa = FormatSpec::napa();
        assert_eq!(napa.physical_label(), "NAPA Format (30mm × 30mm)");
        assert_eq!(napa.dimensions_label(), "300 × 300 px");
        assert_eq!(napa.file_size_label(), "~500 KB");
    }
}
