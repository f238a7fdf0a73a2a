use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::image::ImageError;

/// Decodes the bytes as a bitmap and opens them in the platform image viewer.
///
/// The decode is the validity check: bytes that are not a supported image
/// fail here instead of producing a broken viewer window. The viewer itself
/// is fire-and-forget; we spawn it and return without waiting.
pub fn show(bytes: &[u8], file_name: &str) -> Result<(), ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    debug!(
        "Displaying {}x{} image ({})",
        decoded.width(),
        decoded.height(),
        file_name
    );

    let temp_path = std::env::temp_dir().join(format!(
        "scratchpad_{}_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        sanitize_filename::sanitize(file_name)
    ));
    fs::write(&temp_path, bytes).map_err(ImageError::Viewer)?;

    spawn_viewer(&temp_path).map_err(ImageError::Viewer)?;
    info!("Opened viewer for {}", temp_path.display());
    Ok(())
}

fn spawn_viewer(path: &Path) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    };
    command.spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0B, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x60, 0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x01, 0x7A, 0x5E, 0xAB, 0x3F,
        0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_garbage_bytes_fail_decode() {
        let result = show(b"not an image", "garbage.png");
        assert!(matches!(result, Err(ImageError::Bitmap(_))));
    }

    #[test]
    fn test_png_bytes_decode() {
        let decoded = image::load_from_memory(PNG_BYTES);
        assert!(decoded.is_ok());
        assert_eq!(decoded.unwrap().width(), 1);
    }
}
