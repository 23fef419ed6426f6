//! Clipboard side channel with a copy throttle.
//!
//! Pressing Enter on a result fires both the result action and the context
//! menu's "Copy (Enter)" for the same gesture. The throttle lets only the
//! first one through per cooldown window.

use crate::error::LllmError;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_COPY_COOLDOWN: Duration = Duration::from_secs(1);

/// Where copied text goes.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), LllmError>;
}

/// The OS clipboard via arboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), LllmError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// One successful copy per `cooldown`.
pub struct CopyThrottle {
    cooldown: Duration,
    clock: Arc<dyn Clock>,
    last_copy: Mutex<Option<Instant>>,
}

impl CopyThrottle {
    pub fn new(cooldown: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cooldown,
            clock,
            last_copy: Mutex::new(None),
        }
    }

    /// Copy `value` unless the last copy was within the cooldown.
    ///
    /// Returns `false` when throttled or when the clipboard refused the
    /// write. A `None` value passes the throttle without writing.
    pub fn try_copy(&self, sink: &dyn ClipboardSink, value: Option<&str>) -> bool {
        let mut last_copy = match self.last_copy.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = self.clock.now();

        if let Some(last) = *last_copy {
            if now.saturating_duration_since(last) < self.cooldown {
                log::info!("[CLIPBOARD] Copy called too frequently, skipping");
                return false;
            }
        }

        if let Some(text) = value {
            if let Err(e) = sink.set_text(text) {
                log::error!("[CLIPBOARD] {}", e);
                return false;
            }
            log::info!("[CLIPBOARD] Copied {} chars to clipboard", text.len());
            *last_copy = Some(now);
        }
        true
    }
}

impl Default for CopyThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_COOLDOWN, Arc::new(SystemClock))
    }
}
