//! Error types for classification.

use thiserror::Error;

/// Failures of the primary classifier.
///
/// Every variant means "primary unavailable" to the pipeline: none of these
/// propagate past the classification layer, they trigger the deterministic
/// fallback instead.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Classifier call exceeded its deadline.
    #[error("Classifier timeout after {0}ms")]
    Timeout(u64),

    /// Classifier service returned an error response (4xx, 5xx).
    #[error("Classifier error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The model answered without selecting a tool.
    #[error("No tool selection in classifier response")]
    NoSelection,

    /// The model selected a tool that is not in the catalog.
    #[error("Unknown tool '{0}' in classifier response")]
    UnknownTool(String),

    /// Tool arguments were not valid JSON.
    #[error("Malformed arguments for tool '{tool}': {detail}")]
    MalformedArguments { tool: String, detail: String },

    /// Classifier response doesn't match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
