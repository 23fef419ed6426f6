//! Query classification — decides what the launcher input currently means.
//!
//! The user types into the launcher one keystroke at a time. Only input
//! ending with the configured trigger is ever sent. A `/` means the user is
//! reaching for a special command (only `screenshot` exists today).
//!
//! Everything here is pure: no network, no display, no clock.

use crate::settings::PluginConfig;
use regex::Regex;
use std::sync::OnceLock;

/// The only special command.
pub const SCREENSHOT_COMMAND: &str = "screenshot";

/// Character that opens a special command.
pub const COMMAND_MARKER: char = '/';

/// `/screenshot` (whole word), `[screenshot]` or `[/screenshot]`, any letter case.
fn screenshot_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"(?i)\[\s*/?screenshot\s*\]|/screenshot\b").expect("static regex")
    })
}

/// State of the launcher input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    Empty,
    /// Still typing; `text` is the input unchanged.
    Incomplete {
        text: String,
        screenshot_requested: bool,
    },
    /// A bare `/` waits for a command name.
    CommandPending { text: String, command: String },
    /// Trigger seen; `text` is cleaned of trigger and screenshot tag.
    Complete {
        text: String,
        screenshot_requested: bool,
    },
}

impl QueryState {
    pub fn is_complete(&self) -> bool {
        matches!(self, QueryState::Complete { .. })
    }

    pub fn screenshot_requested(&self) -> bool {
        match self {
            QueryState::Incomplete {
                screenshot_requested,
                ..
            }
            | QueryState::Complete {
                screenshot_requested,
                ..
            } => *screenshot_requested,
            _ => false,
        }
    }
}

pub fn has_screenshot_tag(text: &str) -> bool {
    screenshot_tag().is_match(text)
}

/// Remove every screenshot tag and trim what is left.
pub fn strip_screenshot_tag(text: &str) -> String {
    screenshot_tag().replace_all(text, "").trim().to_string()
}

/// Classify raw launcher input against the current config.
///
/// Trigger match is checked first, so `"a /b~"` is `Complete`.
pub fn classify(raw: &str, cfg: &PluginConfig) -> QueryState {
    if raw.trim().is_empty() {
        return QueryState::Empty;
    }

    if let Some(body) = raw.strip_suffix(cfg.trigger_keyword.as_str()) {
        let screenshot_requested = has_screenshot_tag(body);
        let text = if screenshot_requested {
            strip_screenshot_tag(body)
        } else {
            body.trim().to_string()
        };
        return QueryState::Complete {
            text,
            screenshot_requested,
        };
    }

    let screenshot_requested = has_screenshot_tag(raw);
    if !screenshot_requested && raw.contains(COMMAND_MARKER) {
        return QueryState::CommandPending {
            text: raw.to_string(),
            command: SCREENSHOT_COMMAND.to_string(),
        };
    }

    QueryState::Incomplete {
        text: raw.to_string(),
        screenshot_requested,
    }
}

/// Complete the last pending `/` in `text` to `/<command>`.
///
/// `"test /"` → `"test /screenshot"`, `"test /scr"` → `"test /screenshot"`.
pub fn complete_command(text: &str, command: &str) -> String {
    match text.rfind(COMMAND_MARKER) {
        Some(idx) => format!("{}{}{}", &text[..idx], COMMAND_MARKER, command),
        None => format!("{}{}{}", text, COMMAND_MARKER, command),
    }
}
