//! Real desktop backend: xcap for pixels, Win32 for window visibility.
//!
//! Hiding other applications' windows is only supported on Windows. On other
//! targets the window list is empty, so the capture proceeds with nothing
//! hidden.

use super::{DisplayBackend, WindowEntry};
use crate::error::LllmError;
use image::DynamicImage;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDisplay;

impl DisplayBackend for SystemDisplay {
    fn list_visible_windows(&self) -> Result<Vec<WindowEntry>, LllmError> {
        platform::list_visible_windows()
    }

    fn hide(&self, window: &WindowEntry) -> Result<(), LllmError> {
        platform::set_visible(window, false)
    }

    fn show(&self, window: &WindowEntry) -> Result<(), LllmError> {
        platform::set_visible(window, true)
    }

    fn capture_display(&self) -> Result<Vec<u8>, LllmError> {
        capture_primary_png()
    }
}

/// Capture the primary monitor and encode it as PNG in memory.
fn capture_primary_png() -> Result<Vec<u8>, LllmError> {
    use xcap::Monitor;

    let start = std::time::Instant::now();
    let monitors = Monitor::all()
        .map_err(|e| LllmError::Capture(format!("Failed to enumerate monitors: {}", e)))?;

    let primary = monitors
        .into_iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .ok_or_else(|| LllmError::Capture("No primary monitor found".to_string()))?;

    let buffer = primary
        .capture_image()
        .map_err(|e| LllmError::Capture(format!("Failed to capture screen: {}", e)))?;
    let (width, height) = (buffer.width(), buffer.height());

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgba8(buffer)
        .write_to(
            &mut std::io::Cursor::new(&mut png_bytes),
            image::ImageFormat::Png,
        )
        .map_err(|e| LllmError::Capture(format!("PNG encode failed: {}", e)))?;

    log::info!(
        "[CAPTURE] {}x{} captured and encoded in {}ms",
        width,
        height,
        start.elapsed().as_millis()
    );
    Ok(png_bytes)
}

#[cfg(target_os = "windows")]
use super::win32 as platform;

#[cfg(not(target_os = "windows"))]
mod platform {
    use super::{LllmError, WindowEntry};

    pub fn list_visible_windows() -> Result<Vec<WindowEntry>, LllmError> {
        log::debug!("[CAPTURE] Window hiding is only supported on Windows");
        Ok(Vec::new())
    }

    pub fn set_visible(window: &WindowEntry, _visible: bool) -> Result<(), LllmError> {
        Err(LllmError::Capture(format!(
            "cannot change visibility of '{}' on this platform",
            window.title
        )))
    }
}
