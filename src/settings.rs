//! Plugin settings — config model, host option parsing, env loading.
//!
//! The host hands over its whole option list whenever the user edits the
//! settings page. We build a fresh `PluginConfig` from it and swap it in
//! atomically, so a query in flight always sees either the old or the new
//! config, never a mix of both.

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models/";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-04-17";
pub const DEFAULT_TRIGGER: &str = "~";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You're a helpful assistant that provides concise and accurate answers to user queries. Your answer should be short and to the point. Respond in plain text. Do not include any code blocks or markdown formatting. Use google search if needed.";

// ── Host option keys ─────────────────────────────────────────────────

pub const KEY_ENDPOINT: &str = "LLMEndpoint";
pub const KEY_MODEL: &str = "LLMModel";
pub const KEY_API_KEY: &str = "APIKey";
pub const KEY_TRIGGER: &str = "SendTriggerKeyword";
pub const KEY_SYSTEM_PROMPT: &str = "SystemPrompt";
pub const KEY_GOOGLE_SEARCH: &str = "GoogleSearch";

/// Everything a classification or completion call needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Base URL; the model name is appended verbatim.
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub trigger_keyword: String,
    pub system_prompt: String,
    /// Attach the `google_search` tool to every request.
    pub tools_enabled: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            trigger_keyword: DEFAULT_TRIGGER.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            tools_enabled: true,
        }
    }
}

/// One entry of the host's settings list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOption {
    pub key: String,
    pub text_value: Option<String>,
    pub value: Option<bool>,
}

impl PluginOption {
    pub fn text(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            text_value: Some(value.to_string()),
            value: None,
        }
    }

    pub fn flag(key: &str, value: bool) -> Self {
        Self {
            key: key.to_string(),
            text_value: None,
            value: Some(value),
        }
    }
}

/// The host's settings payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSettings {
    pub additional_options: Option<Vec<PluginOption>>,
}

impl PluginConfig {
    /// Build a config from the host's settings.
    ///
    /// No settings (or no option list) → full defaults. Options missing from
    /// a present list fall back to their defaults, except the search toggle,
    /// which is off unless the host says otherwise.
    pub fn from_settings(settings: Option<&PluginSettings>) -> Self {
        let options = match settings.and_then(|s| s.additional_options.as_deref()) {
            Some(options) => options,
            None => {
                log::info!("[SETTINGS] No settings provided, using default values");
                return Self::default();
            }
        };

        let text = |key: &str, default: &str| -> String {
            options
                .iter()
                .find(|o| o.key == key)
                .and_then(|o| o.text_value.clone())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            endpoint: text(KEY_ENDPOINT, DEFAULT_ENDPOINT),
            model: text(KEY_MODEL, DEFAULT_MODEL),
            api_key: text(KEY_API_KEY, ""),
            trigger_keyword: normalize_trigger(text(KEY_TRIGGER, DEFAULT_TRIGGER)),
            system_prompt: text(KEY_SYSTEM_PROMPT, DEFAULT_SYSTEM_PROMPT),
            tools_enabled: options
                .iter()
                .find(|o| o.key == KEY_GOOGLE_SEARCH)
                .and_then(|o| o.value)
                .unwrap_or(false),
        }
    }

    /// Build a config from the environment, loading `.env.local` → `.env`
    /// from the working directory first.
    ///
    /// Reads `GEMINI_API_KEY`, `LLLM_ENDPOINT`, `LLLM_MODEL`, `LLLM_TRIGGER`,
    /// `LLLM_SYSTEM_PROMPT` and `LLLM_GOOGLE_SEARCH` (`true`/`1`/`on`).
    pub fn from_env() -> Self {
        for env_file in [".env.local", ".env"] {
            if dotenvy::from_filename(env_file).is_ok() {
                log::info!("[SETTINGS] Loaded {}", env_file);
                break;
            }
        }

        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            endpoint: var("LLLM_ENDPOINT").unwrap_or(defaults.endpoint),
            model: var("LLLM_MODEL").unwrap_or(defaults.model),
            api_key: var("GEMINI_API_KEY").unwrap_or_default(),
            trigger_keyword: normalize_trigger(
                var("LLLM_TRIGGER").unwrap_or(defaults.trigger_keyword),
            ),
            system_prompt: var("LLLM_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
            tools_enabled: var("LLLM_GOOGLE_SEARCH")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "on" | "yes"))
                .unwrap_or(defaults.tools_enabled),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn log_summary(&self) {
        log::info!("[SETTINGS] Endpoint set to: {}", self.endpoint);
        log::info!("[SETTINGS] Model set to: {}", self.model);
        log::info!(
            "[SETTINGS] APIKey is {}",
            if self.has_api_key() { "set" } else { "not set" }
        );
        log::info!("[SETTINGS] SendTriggerKeyword set to: {}", self.trigger_keyword);
        log::info!("[SETTINGS] SystemPrompt set to: '{}'", self.system_prompt);
        log::info!(
            "[SETTINGS] GoogleSearch is {}",
            if self.tools_enabled { "enabled" } else { "disabled" }
        );
    }
}

/// An empty trigger would make every keystroke a finished query.
fn normalize_trigger(trigger: String) -> String {
    if trigger.is_empty() {
        log::warn!("[SETTINGS] Empty trigger keyword, falling back to '{}'", DEFAULT_TRIGGER);
        DEFAULT_TRIGGER.to_string()
    } else {
        trigger
    }
}

/// Holder of the live config. Readers get an `Arc` snapshot.
pub struct SettingsStore {
    current: ArcSwap<PluginConfig>,
}

impl SettingsStore {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    pub fn load(&self) -> Arc<PluginConfig> {
        self.current.load_full()
    }

    pub fn replace(&self, config: PluginConfig) {
        config.log_summary();
        self.current.store(Arc::new(config));
        log::info!("[SETTINGS] Settings update complete");
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(PluginConfig::default())
    }
}

// ── Settings page descriptors ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Textbox,
    Checkbox,
}

/// What the host renders for one option on its settings page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDescriptor {
    pub key: &'static str,
    pub display_label: &'static str,
    pub display_description: &'static str,
    pub kind: OptionKind,
    pub text_value: Option<&'static str>,
    pub value: Option<bool>,
}

pub fn option_descriptors() -> Vec<OptionDescriptor> {
    let textbox = |key: &'static str,
                   display_label: &'static str,
                   display_description: &'static str,
                   default: &'static str| OptionDescriptor {
        key,
        display_label,
        display_description,
        kind: OptionKind::Textbox,
        text_value: Some(default),
        value: None,
    };

    vec![
        textbox(
            KEY_ENDPOINT,
            "LLM Endpoint Base URL",
            "Base endpoint for the model (e.g. https://generativelanguage.googleapis.com/v1beta/models/). The model name is appended.",
            DEFAULT_ENDPOINT,
        ),
        textbox(KEY_MODEL, "LLM Model", "Model name appended to the endpoint", DEFAULT_MODEL),
        textbox(KEY_API_KEY, "API Key", "Your Gemini API key", ""),
        textbox(
            KEY_TRIGGER,
            "Send Trigger Keyword",
            "Ending the input with this keyword sends the query",
            DEFAULT_TRIGGER,
        ),
        textbox(
            KEY_SYSTEM_PROMPT,
            "System Prompt",
            "Guides the model's responses (optional)",
            DEFAULT_SYSTEM_PROMPT,
        ),
        OptionDescriptor {
            key: KEY_GOOGLE_SEARCH,
            display_label: "Google Search",
            display_description: "Let the model ground answers with Google Search",
            kind: OptionKind::Checkbox,
            text_value: None,
            value: Some(true),
        },
    ]
}
