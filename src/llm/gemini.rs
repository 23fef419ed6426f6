//! Gemini `generateContent` client — one request, one answer.
//!
//! Contract:
//! - Always returns a `CompletionResult`, never an `Err`
//! - Empty text and a missing API key short-circuit before any I/O
//! - API key in the URL query param, not a header
//! - Non-2xx, transport and non-JSON bodies → `Failure("Error querying LLM: …")`
//! - Well-formed JSON missing `candidates[0].content.parts[0].text` → `Answer("")`
//!
//! No retry, no streaming, transport-default timeout.

use super::types::{extract_answer, CompletionRequest, CompletionResult, GenerateContentRequest};
use crate::error::LllmError;
use crate::settings::PluginConfig;

/// Holds the HTTP connection pool shared by every query.
#[derive(Clone, Default)]
pub struct CompletionClient {
    http: reqwest::Client,
}

impl CompletionClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Send one completion and turn every outcome into displayable data.
    pub async fn complete(&self, req: &CompletionRequest, cfg: &PluginConfig) -> CompletionResult {
        match self.try_complete(req, cfg).await {
            Ok(answer) => {
                log::info!("[LLM] Parsed final response: {} chars", answer.len());
                CompletionResult::Answer(answer)
            }
            Err(LllmError::MissingApiKey) => {
                log::warn!("[LLM] API key is not set, query not sent");
                CompletionResult::Failure(LllmError::MissingApiKey.to_string())
            }
            Err(e) => {
                log::error!("[LLM] {}", e);
                CompletionResult::Failure(e.to_string())
            }
        }
    }

    async fn try_complete(
        &self,
        req: &CompletionRequest,
        cfg: &PluginConfig,
    ) -> Result<String, LllmError> {
        if req.text.is_empty() {
            return Err(LllmError::EmptyInput);
        }
        if !cfg.has_api_key() {
            return Err(LllmError::MissingApiKey);
        }

        let body = GenerateContentRequest::from(req);
        log::info!(
            "[LLM] Querying {} ({} chars, image: {}, system prompt: {}, google search: {})",
            cfg.model,
            req.text.len(),
            req.image.is_some(),
            body.system_instruction.is_some(),
            body.tools.is_some(),
        );

        let start = std::time::Instant::now();
        let response = self
            .http
            .post(generate_content_url(cfg))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let raw = response.text().await?;
        log::info!("[LLM] Response in {}ms", start.elapsed().as_millis());

        let json: serde_json::Value = serde_json::from_str(&raw)?;
        Ok(extract_answer(&json))
    }
}

/// `{endpoint}{model}:generateContent?key={api_key}`. The endpoint is used verbatim.
pub fn generate_content_url(cfg: &PluginConfig) -> String {
    format!(
        "{}{}:generateContent?key={}",
        cfg.endpoint, cfg.model, cfg.api_key
    )
}
