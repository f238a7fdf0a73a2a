pub mod logger;

use std::path::Path;

use crate::image::ALLOWED_EXTENSIONS;

const FALLBACK_FILE_NAME: &str = "image.png";

/// Derives a usable image file name from a URL, falling back to `image.png`
/// when the URL has no path segment or an extension we do not accept.
pub fn file_name_from_url(url: &str) -> String {
    let segment = url::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(String::from))
        })
        .map(|name| sanitize_filename::sanitize(name));

    match segment {
        Some(name) if has_allowed_extension(&name) => name,
        _ => FALLBACK_FILE_NAME.to_string(),
    }
}

fn has_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
