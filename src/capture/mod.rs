//! Screen capture domain — public API.
//!
//! This module owns the screenshot side channel: hide the launcher's own
//! window, grab the primary display as PNG, put the window back.
//! External code should only use the items exported here.
//!
//! Platform access goes through `DisplayBackend`, so the hide → capture →
//! restore sequence is the same code for the real desktop and for tests.

mod screenshot;
mod system;
#[cfg(target_os = "windows")]
mod win32;

pub use screenshot::{capture_with_app_hidden, capture_with_pacing, CapturePacing};
pub use system::SystemDisplay;

use crate::error::LllmError;
use crate::llm::ImagePayload;
use base64::Engine;

pub const PNG_MIME_TYPE: &str = "image/png";

/// A visible top-level window as seen at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    /// Native handle (HWND on Windows).
    pub handle: isize,
    pub title: String,
    /// Executable name without extension, e.g. `PowerToys.PowerLauncher`.
    pub process_name: String,
}

/// Platform capabilities the capture sequence needs.
pub trait DisplayBackend: Send + Sync {
    fn list_visible_windows(&self) -> Result<Vec<WindowEntry>, LllmError>;
    fn hide(&self, window: &WindowEntry) -> Result<(), LllmError>;
    fn show(&self, window: &WindowEntry) -> Result<(), LllmError>;
    /// Full bounds of the primary display, PNG-encoded.
    fn capture_display(&self) -> Result<Vec<u8>, LllmError>;
}

/// PNG bytes + MIME type, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureResult {
    pub image: Option<Vec<u8>>,
    pub mime_type: Option<String>,
}

impl CaptureResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return Self::empty();
        }
        Self {
            image: Some(bytes),
            mime_type: Some(PNG_MIME_TYPE.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none() || self.mime_type.is_none()
    }

    pub fn to_base64(&self) -> Option<String> {
        self.image
            .as_ref()
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// Image for a completion request, present only when both parts are.
    pub fn into_payload(self) -> Option<ImagePayload> {
        match (self.image, self.mime_type) {
            (Some(bytes), Some(mime_type)) => Some(ImagePayload { bytes, mime_type }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_result_has_mime_and_base64() {
        let result = CaptureResult::png(b"png".to_vec());
        assert!(!result.is_empty());
        assert_eq!(result.mime_type.as_deref(), Some("image/png"));
        assert_eq!(result.to_base64().as_deref(), Some("cG5n"));
    }

    #[test]
    fn empty_bytes_make_empty_result() {
        assert!(CaptureResult::png(Vec::new()).is_empty());
        assert_eq!(CaptureResult::png(Vec::new()).to_base64(), None);
    }

    #[test]
    fn payload_requires_both_parts() {
        assert_eq!(CaptureResult::empty().into_payload(), None);
        let half = CaptureResult {
            image: Some(vec![1]),
            mime_type: None,
        };
        assert_eq!(half.into_payload(), None);
        assert_eq!(
            CaptureResult::png(vec![1, 2]).into_payload(),
            Some(ImagePayload {
                bytes: vec![1, 2],
                mime_type: "image/png".into()
            })
        );
    }
}
