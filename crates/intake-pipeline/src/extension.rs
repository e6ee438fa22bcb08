//! Canonical file extensions for uploaded images.
//!
//! The remote store's `mimeType` field governs how consumers read a file, so
//! an occasionally wrong extension is tolerated and `jpg` is the catch-all.

const FALLBACK_EXTENSION: &str = "jpg";

/// Maps a MIME type and/or source URL to a file extension.
///
/// Order of precedence:
/// 1. a known image MIME type (`image/jpeg`, `image/png`, `image/webp`, `image/gif`)
/// 2. the URL's last path segment suffix, if it is a known image extension
///    (`jpeg` is normalised to `jpg`)
/// 3. `jpg`
#[must_use]
pub fn resolve_extension(mime_type: &str, source_url: &str) -> &'static str {
    from_mime(mime_type)
        .or_else(|| from_url(source_url))
        .unwrap_or(FALLBACK_EXTENSION)
}

fn from_mime(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

fn from_url(url: &str) -> Option<&'static str> {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    let last_segment = without_query.rsplit('/').next().unwrap_or_default();
    let (_, suffix) = last_segment.rsplit_once('.')?;
    match suffix.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("jpg"),
        "png" => Some("png"),
        "webp" => Some("webp"),
        "gif" => Some("gif"),
        _ => None,
    }
}
