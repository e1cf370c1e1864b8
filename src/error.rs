//! Error types for report synthesis.
//!
//! Only three kinds ever reach a caller of `ReportGenerator::synthesize`:
//! a malformed locale bundle, a render failure, or (from the save step) an
//! assembly failure. `ResolutionIncomplete` stays inside the resolver cascade.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = ReportError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A localized bundle lacked one of the four required fields.
    /// Recovered by falling through to the next resolver strategy.
    #[error("disease bundle `{key}` is missing required field `{field}`")]
    ResolutionIncomplete { key: String, field: &'static str },

    /// A localized bundle had all four fields but one held the wrong JSON type.
    #[error("disease bundle `{key}` has a malformed `{field}` field")]
    MalformedBundle { key: String, field: &'static str },

    /// A draw or measure primitive could not be carried out.
    #[error("render failure: {0}")]
    RenderFailure(String),

    /// The finished artifact could not be handed to the host.
    #[error("failed to save report `{file_name}`")]
    AssemblyFailure {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown crop `{0}` (expected rice, wheat, corn, potato or sugarcane)")]
    UnknownCrop(String),

    #[error("invalid classification response: {0}")]
    InvalidResponse(String),

    /// The classification service answered with an `{ "error": ... }` body.
    #[error("classification failed: {0}")]
    Classification(String),

    #[error("failed to load locale file {path}: {reason}")]
    LocaleLoad { path: PathBuf, reason: String },
}

impl ReportError {
    pub fn render(reason: impl Into<String>) -> Self {
        ReportError::RenderFailure(reason.into())
    }

    /// True when re-running the save step alone may succeed.
    pub fn is_retryable_save(&self) -> bool {
        matches!(self, ReportError::AssemblyFailure { .. })
    }
}
