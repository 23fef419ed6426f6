//! Completion request/result types and the Gemini wire format.
//!
//! `CompletionRequest` is what the launcher asks for; `GenerateContentRequest`
//! is what goes over the wire. The response is not deserialized into a
//! struct: it is walked as a `serde_json::Value` so that any missing field
//! degrades to an empty answer.

use base64::Engine;
use serde::Serialize;

use crate::settings::PluginConfig;

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// One completion call. Built fresh for every finished query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub text: String,
    pub image: Option<ImagePayload>,
    pub system_prompt: Option<String>,
    pub tools_enabled: bool,
}

impl CompletionRequest {
    /// Text-only request carrying the config's prompt and tool settings.
    pub fn new(text: impl Into<String>, cfg: &PluginConfig) -> Self {
        Self {
            text: text.into(),
            image: None,
            system_prompt: Some(cfg.system_prompt.clone()).filter(|p| !p.is_empty()),
            tools_enabled: cfg.tools_enabled,
        }
    }

    pub fn with_image(mut self, image: Option<ImagePayload>) -> Self {
        self.image = image;
        self
    }
}

/// Outcome of a completion. Failures are text the user can read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Answer(String),
    Failure(String),
}

impl CompletionResult {
    /// The text to display, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            CompletionResult::Answer(text) | CompletionResult::Failure(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CompletionResult::Failure(_))
    }
}

// ── Wire format ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded).
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

/// Serializes to `{}`; its presence alone enables the tool.
#[derive(Debug, Default, Serialize)]
pub struct GoogleSearch {}

impl From<&CompletionRequest> for GenerateContentRequest {
    fn from(req: &CompletionRequest) -> Self {
        let mut parts = Vec::with_capacity(2);
        if !req.text.is_empty() {
            parts.push(Part::Text {
                text: req.text.clone(),
            });
        }
        if let Some(image) = &req.image {
            if !image.bytes.is_empty() && !image.mime_type.is_empty() {
                parts.push(Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
                    },
                });
            }
        }

        Self {
            contents: vec![Content { parts }],
            system_instruction: req
                .system_prompt
                .as_ref()
                .filter(|p| !p.is_empty())
                .map(|p| Content {
                    parts: vec![Part::Text { text: p.clone() }],
                }),
            tools: req.tools_enabled.then(|| {
                vec![Tool {
                    google_search: GoogleSearch::default(),
                }]
            }),
        }
    }
}

/// Extract `candidates[0].content.parts[0].text`; anything missing → `""`.
pub fn extract_answer(body: &serde_json::Value) -> String {
    body.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string()
}
