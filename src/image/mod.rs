pub mod error;
pub mod viewer;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub use error::ImageError;

// Constants for image acquisition behavior
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30); // Hard cap per GET
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10); // Timeout for establishing the connection

static HTTP_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://").expect("static regex")
});

/// One image resource: a slot on disk (`folder/file_name`), an optional
/// remote source, and a lazily populated base64 cache.
///
/// All identity validation happens once, in [`ImageResource::new`]. A folder
/// removed after construction surfaces later as a filesystem error from the
/// I/O call that hits it, not as a validation error.
#[derive(Debug, Clone)]
pub struct ImageResource {
    folder: PathBuf,
    file_name: String,
    // Kept from construction so it is never re-derived
    extension: String,
    source_url: Option<String>,
    encoded_data: Option<String>,
}

impl ImageResource {
    /// Creates a validated image resource.
    ///
    /// # Arguments
    /// * `folder` - Directory the image lives in; must already exist
    /// * `file_name` - File name with a jpg/jpeg/png/gif/webp extension
    /// * `source_url` - Optional remote source; must start with http:// or https://
    ///
    /// # Returns
    /// * The resource, or `ImageError::Validation` describing the first
    ///   check that failed
    pub fn new(
        folder: impl Into<PathBuf>,
        file_name: impl Into<String>,
        source_url: Option<String>,
    ) -> Result<Self, ImageError> {
        let folder = folder.into();
        if !folder.is_dir() {
            return Err(ImageError::Validation(format!(
                "Folder path does not exist: {}",
                folder.display()
            )));
        }

        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ImageError::Validation(format!(
                "Invalid file format: {file_name}"
            )));
        }

        if let Some(url) = source_url.as_deref() {
            if !HTTP_URL_REGEX.is_match(url) {
                return Err(ImageError::Validation(format!("Invalid URL: {url}")));
            }
        }

        debug!("Validated image resource {} in {}", file_name, folder.display());
        Ok(Self {
            folder,
            file_name,
            extension,
            source_url,
            encoded_data: None,
        })
    }

    /// Seeds the base64 cache, e.g. with a payload received from an API.
    /// The data is validated lazily, when a decode actually runs.
    pub fn with_encoded_data(mut self, encoded: impl Into<String>) -> Self {
        self.encoded_data = Some(encoded.into());
        self
    }

    /// Creates a local-only resource with no remote source.
    pub fn local(
        folder: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Result<Self, ImageError> {
        Self::new(folder, file_name, None)
    }

    /// Full path of the image on disk.
    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// MIME type implied by the validated extension.
    pub fn mime_type(&self) -> &'static str {
        match self.extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "image/png",
        }
    }

    /// The cached base64 representation, if a conversion has run.
    pub fn encoded_data(&self) -> Option<&str> {
        self.encoded_data.as_deref()
    }

    fn require_source_url(&self) -> Result<&str, ImageError> {
        self.source_url.as_deref().ok_or_else(|| {
            ImageError::Validation(format!(
                "No source URL configured for {}",
                self.file_name
            ))
        })
    }

    /// GETs the source URL and returns the raw body. Success is exactly
    /// HTTP 200; anything else is a hard failure carrying the URL.
    async fn fetch_bytes(&self) -> Result<Vec<u8>, ImageError> {
        let url = self.require_source_url()?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|source| ImageError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!("Requesting image from {}", url);
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|source| ImageError::Transport {
                url: url.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            warn!("Image download failed: {} returned {}", url, response.status());
            return Err(ImageError::Http {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ImageError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    /// Downloads the image from the source URL and writes the raw body to
    /// `folder/file_name`. Nothing is written unless the status was 200.
    pub async fn fetch_to_disk(&self) -> Result<(), ImageError> {
        let bytes = self.fetch_bytes().await?;
        let path = self.path();
        fs::write(&path, &bytes).map_err(|e| ImageError::file_not_found(path.clone(), e))?;
        info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Reads `folder/file_name` from disk, base64-encodes it, and caches the
    /// result as the authoritative representation.
    pub fn encode_file_to_base64(&mut self) -> Result<String, ImageError> {
        let path = self.path();
        let bytes = fs::read(&path).map_err(|e| ImageError::file_not_found(path, e))?;
        let encoded = BASE64.encode(&bytes);
        self.encoded_data = Some(encoded.clone());
        Ok(encoded)
    }

    /// Downloads the image and base64-encodes the response body directly,
    /// without touching the disk. Caches the result.
    pub async fn encode_url_to_base64(&mut self) -> Result<String, ImageError> {
        let bytes = self.fetch_bytes().await?;
        let encoded = BASE64.encode(&bytes);
        self.encoded_data = Some(encoded.clone());
        Ok(encoded)
    }

    /// Decodes the cached base64 data and writes it to `folder/file_name`.
    pub fn decode_base64_to_file(&self) -> Result<(), ImageError> {
        let encoded = self.encoded_data.as_deref().ok_or_else(|| {
            ImageError::Validation(format!(
                "No base64 data cached for {}",
                self.file_name
            ))
        })?;
        let bytes = BASE64.decode(encoded)?;
        let path = self.path();
        fs::write(&path, &bytes).map_err(|e| ImageError::file_not_found(path.clone(), e))?;
        info!("Decoded {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Opens the image in the platform viewer. Prefers the cached base64
    /// data; falls back to reading `folder/file_name` from disk.
    pub fn display(&self) -> Result<(), ImageError> {
        let bytes = match self.encoded_data.as_deref() {
            Some(encoded) => BASE64.decode(encoded)?,
            None => {
                let path = self.path();
                fs::read(&path).map_err(|e| ImageError::file_not_found(path, e))?
            }
        };
        viewer::show(&bytes, &self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_construct_with_valid_fields() {
        let dir = tempdir().unwrap();
        let resource = ImageResource::new(
            dir.path(),
            "cat.png",
            Some("https://example.com/cat.png".to_string()),
        );
        assert!(resource.is_ok());
        let resource = resource.unwrap();
        assert_eq!(resource.file_name(), "cat.png");
        assert!(resource.encoded_data().is_none());
    }

    #[test]
    fn test_missing_folder_rejected() {
        let result = ImageResource::local("./definitely_not_a_real_folder", "cat.png");
        assert!(matches!(result, Err(ImageError::Validation(_))));
    }

    #[test]
    fn test_bad_extension_rejected() {
        let dir = tempdir().unwrap();
        for name in ["cat.bmp", "cat.txt", "cat", "cat.png.exe"] {
            let result = ImageResource::local(dir.path(), name);
            assert!(
                matches!(result, Err(ImageError::Validation(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let dir = tempdir().unwrap();
        let result = ImageResource::local(dir.path(), "cat.PNG");
        assert!(result.is_ok());
    }

    #[test]
    fn test_bad_url_rejected() {
        let dir = tempdir().unwrap();
        for url in ["ftp://example.com/cat.png", "example.com/cat.png", ""] {
            let result = ImageResource::new(dir.path(), "cat.png", Some(url.to_string()));
            assert!(
                matches!(result, Err(ImageError::Validation(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_file_round_trip_is_byte_identical() {
        let dir = tempdir().unwrap();
        let original: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        std::fs::write(dir.path().join("cat.png"), &original).unwrap();

        let mut resource = ImageResource::local(dir.path(), "cat.png").unwrap();
        let encoded = resource.encode_file_to_base64().unwrap();
        assert_eq!(resource.encoded_data(), Some(encoded.as_str()));

        // Overwrite the file so the decode step has to reproduce it
        std::fs::write(dir.path().join("cat.png"), b"garbage").unwrap();
        resource.decode_base64_to_file().unwrap();

        let restored = std::fs::read(dir.path().join("cat.png")).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_encode_missing_file_names_path() {
        let dir = tempdir().unwrap();
        let mut resource = ImageResource::local(dir.path(), "missing.png").unwrap();
        let err = resource.encode_file_to_base64().unwrap_err();
        match err {
            ImageError::FileNotFound { path, .. } => {
                assert!(path.ends_with("missing.png"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_without_cache_fails() {
        let dir = tempdir().unwrap();
        let resource = ImageResource::local(dir.path(), "cat.png").unwrap();
        assert!(matches!(
            resource.decode_base64_to_file(),
            Err(ImageError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_without_source_url_fails() {
        let dir = tempdir().unwrap();
        let resource = ImageResource::local(dir.path(), "cat.png").unwrap();
        assert!(matches!(
            resource.fetch_to_disk().await,
            Err(ImageError::Validation(_))
        ));
    }
}
