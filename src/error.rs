//! Error type shared by the completion, capture and clipboard domains.
//!
//! None of these cross the public boundary as `Err`: the launcher turns
//! them into displayable text, empty captures, or `false` copy results.
//! The `Display` strings are what the user ends up reading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LllmError {
    #[error("Input is empty. Please enter a query.")]
    EmptyInput,

    #[error("API Key is not configured. Please set it in the plugin settings.")]
    MissingApiKey,

    /// Transport failure or a non-2xx status from the remote API.
    #[error("Error querying LLM: {0}")]
    Http(String),

    /// A 2xx response whose body is not JSON at all.
    #[error("Error querying LLM: {0}")]
    Response(String),

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl From<reqwest::Error> for LllmError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries `?key=<api key>`.
        let err = err.without_url();
        if err.is_timeout() {
            LllmError::Http(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            LllmError::Http(format!("Connection failed: {}", err))
        } else {
            LllmError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LllmError {
    fn from(err: serde_json::Error) -> Self {
        LllmError::Response(format!("Invalid JSON response: {}", err))
    }
}

impl From<arboard::Error> for LllmError {
    fn from(err: arboard::Error) -> Self {
        LllmError::Clipboard(err.to_string())
    }
}
