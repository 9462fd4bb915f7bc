//! Download file names for exported photos.

/// Build the download file name for an export:
/// `passport-photo-<kebab-cased-format-name>-<timestamp>.jpg`.
///
/// The timestamp is in milliseconds since the epoch and is supplied by
/// the caller (the WASM layer stamps it from `Date.now()`).
pub fn export_file_name(format_name: &str, timestamp_ms: u64) -> String {
    format!(
        "passport-photo-{}-{}.jpg",
        kebab_case(format_name),
        timestamp_ms
    )
}

/// Lowercase a display name and collapse whitespace runs into dashes.
fn kebab_case(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
