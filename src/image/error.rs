use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by [`ImageResource`](super::ImageResource) construction and
/// conversions. Nothing here is retried or suppressed; every failure goes
/// straight back to the caller.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Bad folder, extension, or URL caught at construction, or an operation
    /// that needs a source URL when none was provided.
    #[error("{0}")]
    Validation(String),

    /// The remote server answered with something other than 200.
    #[error("Failed to download image from {url} (HTTP {status})")]
    Http { url: String, status: u16 },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Missing source file on read, or unwritable destination on write.
    #[error("Image file not found at {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cached base64 payload is not valid base64.
    #[error("Invalid base64 image data: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The bytes do not decode as a supported bitmap.
    #[error("Unsupported image data: {0}")]
    Bitmap(#[from] image::ImageError),

    /// The platform viewer could not be spawned or fed its temp file.
    #[error("Failed to open image viewer: {0}")]
    Viewer(#[source] std::io::Error),
}

impl ImageError {
    pub(crate) fn file_not_found(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileNotFound { path, source }
    }
}
