//! Fixture extension to MIME type mapping.

use std::path::Path;

/// Known fixture extensions. Anything else is served without a `Content-Type`.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("json", "application/json"),
    ("xml", "text/xml"),
    ("txt", "text/plain"),
    ("csv", "text/plain"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("html", "text/html"),
];

/// Look up the MIME type for a file extension (case-insensitive).
pub fn for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Look up the MIME type for a fixture file name.
pub fn for_fixture(name: impl AsRef<Path>) -> Option<&'static str> {
    name.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(for_extension)
}
