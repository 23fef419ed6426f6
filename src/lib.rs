//! LLLM — launcher extension that sends a finished query to Gemini.
//!
//! The host calls `Launcher::query` on every keystroke. Input ending with
//! the trigger keyword is sent (optionally with a screenshot of the primary
//! display) and the answer comes back as the result's subtitle, ready to be
//! copied.
//!
//! Domains:
//!   - query.rs     — input classification (pure)
//!   - llm/         — Gemini request/response + HTTP client
//!   - capture/     — hide launcher → capture primary display → restore
//!   - clipboard.rs — clipboard sink + copy throttle
//!   - settings.rs  — config model, host options, env loading, hot swap
//!   - pipeline.rs  — host-facing `Launcher`

pub mod capture;
pub mod clipboard;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod query;
pub mod settings;

pub use error::LllmError;
pub use pipeline::{ContextMenuItem, Launcher, QueryResult};
pub use settings::{PluginConfig, PluginOption, PluginSettings};

/// Initialize `env_logger` once. Default level `info`, `RUST_LOG` overrides.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
