//! Hide → settle → capture → restore.
//!
//! Windows hidden here belong to other processes. They are put back by
//! `HiddenWindows::drop`, which runs on every exit path, panics included.

use super::{CaptureResult, DisplayBackend, WindowEntry};
use std::time::{Duration, Instant};

/// Pauses that let the compositor catch up with visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturePacing {
    /// Before capturing, when at least one window was hidden.
    pub after_hide: Duration,
    /// Before capturing, when nothing was hidden.
    pub without_hide: Duration,
    /// Before restoring hidden windows.
    pub before_restore: Duration,
}

impl Default for CapturePacing {
    fn default() -> Self {
        Self {
            after_hide: Duration::from_millis(200),
            without_hide: Duration::from_millis(100),
            before_restore: Duration::from_millis(50),
        }
    }
}

impl CapturePacing {
    pub fn none() -> Self {
        Self {
            after_hide: Duration::ZERO,
            without_hide: Duration::ZERO,
            before_restore: Duration::ZERO,
        }
    }
}

/// Capture the primary display with every window of `app_name` hidden.
pub fn capture_with_app_hidden(backend: &dyn DisplayBackend, app_name: &str) -> CaptureResult {
    capture_with_pacing(backend, app_name, CapturePacing::default())
}

pub fn capture_with_pacing(
    backend: &dyn DisplayBackend,
    app_name: &str,
    pacing: CapturePacing,
) -> CaptureResult {
    let start = Instant::now();

    let windows = match backend.list_visible_windows() {
        Ok(windows) => windows,
        Err(e) => {
            log::error!("[CAPTURE] Window enumeration failed: {}", e);
            return CaptureResult::empty();
        }
    };

    let hidden = HiddenWindows::hide_matching(backend, windows, app_name, pacing.before_restore);

    std::thread::sleep(if hidden.is_empty() {
        pacing.without_hide
    } else {
        pacing.after_hide
    });

    let result = match backend.capture_display() {
        Ok(png) => {
            log::info!("[CAPTURE] Primary display: {} bytes PNG", png.len());
            CaptureResult::png(png)
        }
        Err(e) => {
            log::error!("[CAPTURE] {}", e);
            CaptureResult::empty()
        }
    };

    drop(hidden);
    log::info!("[CAPTURE] Done in {}ms", start.elapsed().as_millis());
    result
}

/// Case-insensitive match on title or process name. An empty needle
/// matches nothing.
fn window_matches(window: &WindowEntry, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return false;
    }
    window.title.to_lowercase().contains(needle_lower)
        || window.process_name.to_lowercase().contains(needle_lower)
}

/// Windows this capture hid; restored on drop.
struct HiddenWindows<'a> {
    backend: &'a dyn DisplayBackend,
    windows: Vec<WindowEntry>,
    settle: Duration,
}

impl<'a> HiddenWindows<'a> {
    fn hide_matching(
        backend: &'a dyn DisplayBackend,
        candidates: Vec<WindowEntry>,
        app_name: &str,
        settle: Duration,
    ) -> Self {
        let needle = app_name.to_lowercase();
        let mut guard = Self {
            backend,
            windows: Vec::new(),
            settle,
        };

        for window in candidates.into_iter().filter(|w| window_matches(w, &needle)) {
            match backend.hide(&window) {
                Ok(()) => {
                    log::info!(
                        "[CAPTURE] Hiding window: '{}' (handle: {})",
                        window.title,
                        window.handle
                    );
                    guard.windows.push(window);
                }
                Err(e) => log::warn!("[CAPTURE] Could not hide '{}': {}", window.title, e),
            }
        }

        if guard.windows.is_empty() {
            log::info!("[CAPTURE] No visible windows found matching '{}'", app_name);
        }
        guard
    }

    fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Drop for HiddenWindows<'_> {
    fn drop(&mut self) {
        if self.windows.is_empty() {
            return;
        }
        std::thread::sleep(self.settle);
        for window in &self.windows {
            match self.backend.show(window) {
                Ok(()) => log::info!("[CAPTURE] Restored window (handle: {})", window.handle),
                Err(e) => log::error!(
                    "[CAPTURE] Error restoring window {}: {}",
                    window.handle,
                    e
                ),
            }
        }
    }
}
