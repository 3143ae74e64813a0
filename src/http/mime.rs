//! Content types by file extension.

use std::collections::HashMap;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const TYPES: &[(&str, &str)] = &[
    ("css", "text/css; charset=utf-8"),
    ("csv", "text/csv; charset=utf-8"),
    ("gif", "image/gif"),
    ("htm", "text/html; charset=utf-8"),
    ("html", "text/html; charset=utf-8"),
    ("ico", "image/vnd.microsoft.icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript; charset=utf-8"),
    ("json", "application/json"),
    ("mjs", "text/javascript; charset=utf-8"),
    ("mp4", "video/mp4"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain; charset=utf-8"),
    ("wasm", "application/wasm"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("xml", "text/xml; charset=utf-8"),
    ("zip", "application/zip"),
];

/// Read-only extension to media type table.
///
/// Built once at startup and shared by every connection.
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<&'static str, &'static str>,
}

impl MimeTable {
    /// Looks up the media type for `extension` (without the dot).
    ///
    /// Matching ignores ASCII case. Unknown or missing extensions map to
    /// `application/octet-stream`.
    pub fn lookup(&self, extension: Option<&str>) -> &'static str {
        extension
            .and_then(|ext| self.types.get(ext.to_ascii_lowercase().as_str()))
            .copied()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self {
            types: TYPES.iter().copied().collect(),
        }
    }
}
