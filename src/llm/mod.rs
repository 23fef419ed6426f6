//! LLM domain — remote completion against the Gemini API.
//!
//! External code should only use the items exported here.
//!
//!   - types.rs  — request/result types + wire format + answer extraction
//!   - gemini.rs — HTTP client (`CompletionClient::complete`)

mod gemini;
pub mod types;

pub use gemini::{generate_content_url, CompletionClient};
pub use types::{CompletionRequest, CompletionResult, ImagePayload};
