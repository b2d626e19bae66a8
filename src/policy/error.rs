//! Policy error types.

use thiserror::Error;

/// Failures of the confidence policy.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Strict mode rejected a sub-threshold first classification.
    #[error(
        "Classification for '{agent}' rejected: confidence {confidence:.2} below threshold {threshold:.2}"
    )]
    LowConfidenceRejected {
        agent: String,
        confidence: f64,
        threshold: f64,
    },
}
