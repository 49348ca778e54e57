//! MIME type detection module
//!
//! The serving contract pins exact Content-Type values for the three
//! extensions the SPA toolchain emits; every other extension defers to
//! `mime_guess`.

use std::path::Path;

/// Get the Content-Type for a file path
///
/// # Examples
/// ```
/// use spa_server::http::mime::content_type_for;
/// use std::path::Path;
/// assert_eq!(content_type_for(Path::new("dist/index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("dist/app.js")), "application/javascript");
/// assert_eq!(content_type_for(Path::new("dist/logo192.png")), "image/png");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("html") => "text/html",
        _ => mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream"),
    }
}
