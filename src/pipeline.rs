//! Launcher pipeline — what the host calls on every keystroke and on Enter.
//!
//! preview (non-finalizing): classify → hint text. No network, no display.
//! resolve (finalizing):     classify → [capture] → completion → answer.
//!
//! Both produce exactly one `QueryResult`; every failure ends up as its
//! subtitle.

use crate::capture::{self, CaptureResult, DisplayBackend};
use crate::clipboard::{ClipboardSink, CopyThrottle};
use crate::llm::{CompletionClient, CompletionRequest, CompletionResult};
use crate::query::{self, QueryState};
use crate::settings::{PluginConfig, PluginSettings, SettingsStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Process/title substring of the launcher window, hidden while capturing.
pub const LAUNCHER_APP_NAME: &str = "PowerToys.PowerLauncher";

const SCREENSHOT_SUBTITLE: &str = "Capture text from screen (experimental)";

/// One row shown by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub title: String,
    pub subtitle: String,
    /// Text offered by the context menu's copy action.
    pub copy_text: Option<String>,
    /// Replacement query text the host may put into the search box.
    pub autocomplete: Option<String>,
}

/// One context menu entry for a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuItem {
    pub title: String,
    pub font_family: String,
    pub glyph: String,
    pub accelerator: String,
    pub value: String,
}

pub struct Launcher {
    settings: SettingsStore,
    client: CompletionClient,
    display: Arc<dyn DisplayBackend>,
    clipboard: Arc<dyn ClipboardSink>,
    throttle: CopyThrottle,
    hidden_app: String,
}

impl Launcher {
    pub fn new(
        config: PluginConfig,
        display: Arc<dyn DisplayBackend>,
        clipboard: Arc<dyn ClipboardSink>,
        throttle: CopyThrottle,
    ) -> Self {
        Self {
            settings: SettingsStore::new(config),
            client: CompletionClient::new(),
            display,
            clipboard,
            throttle,
            hidden_app: LAUNCHER_APP_NAME.to_string(),
        }
    }

    /// Real desktop, OS clipboard, 1 s copy cooldown.
    pub fn system(config: PluginConfig) -> Self {
        Self::new(
            config,
            Arc::new(capture::SystemDisplay),
            Arc::new(crate::clipboard::SystemClipboard),
            CopyThrottle::default(),
        )
    }

    /// Which application's windows get hidden during capture.
    pub fn with_hidden_app(mut self, app_name: impl Into<String>) -> Self {
        self.hidden_app = app_name.into();
        self
    }

    pub fn config(&self) -> Arc<PluginConfig> {
        self.settings.load()
    }

    pub fn update_settings(&self, settings: Option<&PluginSettings>) {
        log::info!("[LLLM] Updating settings...");
        self.settings.replace(PluginConfig::from_settings(settings));
    }

    /// Host entry point. `finalizing` is the host's delayed-execution flag.
    pub async fn query(&self, raw: &str, finalizing: bool) -> QueryResult {
        if finalizing {
            self.resolve(raw).await
        } else {
            self.preview(raw)
        }
    }

    /// Hint for input still being typed.
    pub fn preview(&self, raw: &str) -> QueryResult {
        let cfg = self.settings.load();
        let subtitle = match query::classify(raw, &cfg) {
            QueryState::Empty => typing_hint(&cfg),
            QueryState::Incomplete {
                screenshot_requested,
                ..
            } => incomplete_hint(&cfg, screenshot_requested),
            QueryState::CommandPending { command, .. } => {
                format!("Type '{}' to simulate screen capture", command)
            }
            QueryState::Complete {
                screenshot_requested,
                ..
            } => {
                if screenshot_requested {
                    format!("Ready to send to {} with a screenshot", cfg.model)
                } else {
                    format!("Ready to send to {}", cfg.model)
                }
            }
        };
        hint(&cfg, subtitle)
    }

    /// Finalized input: send it if it is complete.
    pub async fn resolve(&self, raw: &str) -> QueryResult {
        log::info!("[LLLM] Query received: {} chars", raw.len());
        let cfg = self.settings.load();

        match query::classify(raw, &cfg) {
            QueryState::Empty => {
                let result = self.client.complete(&CompletionRequest::new("", &cfg), &cfg).await;
                answer(&cfg, result)
            }
            QueryState::Incomplete {
                screenshot_requested,
                ..
            } => hint(&cfg, incomplete_hint(&cfg, screenshot_requested)),
            QueryState::CommandPending { text, command } => QueryResult {
                title: command.clone(),
                subtitle: SCREENSHOT_SUBTITLE.to_string(),
                copy_text: None,
                autocomplete: Some(query::complete_command(&text, &command)),
            },
            QueryState::Complete {
                text,
                screenshot_requested,
            } => {
                log::info!("[LLLM] Input for LLM: {} chars", text.len());
                let image = if screenshot_requested && !text.is_empty() {
                    self.capture().await.into_payload()
                } else {
                    None
                };
                let request = CompletionRequest::new(text, &cfg).with_image(image);
                let result = self.client.complete(&request, &cfg).await;
                answer(&cfg, result)
            }
        }
    }

    /// Context menu for a result: one copy entry when there is something to copy.
    pub fn context_menu(&self, result: &QueryResult) -> Vec<ContextMenuItem> {
        result
            .copy_text
            .as_ref()
            .map(|value| ContextMenuItem {
                title: "Copy (Enter)".to_string(),
                font_family: "Segoe Fluent Icons,Segoe MDL2 Assets".to_string(),
                glyph: "\u{E8C8}".to_string(),
                accelerator: "Enter".to_string(),
                value: value.clone(),
            })
            .into_iter()
            .collect()
    }

    /// Throttled clipboard copy; `false` when skipped or failed.
    pub fn copy(&self, value: Option<&str>) -> bool {
        self.throttle.try_copy(self.clipboard.as_ref(), value)
    }

    /// Capture runs on the blocking pool: it sleeps and calls into the OS.
    async fn capture(&self) -> CaptureResult {
        let display = Arc::clone(&self.display);
        let app_name = self.hidden_app.clone();
        match tokio::task::spawn_blocking(move || {
            capture::capture_with_app_hidden(display.as_ref(), &app_name)
        })
        .await
        {
            Ok(result) => result,
            Err(e) => {
                log::error!("[CAPTURE] Capture task failed: {}", e);
                CaptureResult::empty()
            }
        }
    }
}

fn typing_hint(cfg: &PluginConfig) -> String {
    format!(
        "End input with: '{}' or use '/' for special commands.",
        cfg.trigger_keyword
    )
}

/// Same text on the preview and finalizing passes.
fn incomplete_hint(cfg: &PluginConfig, screenshot_requested: bool) -> String {
    if screenshot_requested {
        format!(
            "Screenshot will be attached. End input with: '{}'",
            cfg.trigger_keyword
        )
    } else {
        typing_hint(cfg)
    }
}

fn hint(cfg: &PluginConfig, subtitle: String) -> QueryResult {
    QueryResult {
        title: cfg.model.clone(),
        subtitle,
        copy_text: None,
        autocomplete: None,
    }
}

fn answer(cfg: &PluginConfig, result: CompletionResult) -> QueryResult {
    let text = result.text().to_string();
    QueryResult {
        title: cfg.model.clone(),
        subtitle: text.clone(),
        copy_text: Some(text),
        autocomplete: None,
    }
}
