//! Router error types.

use crate::dispatch::DispatchError;
use crate::policy::{PolicyError, RoutingDecision};
use thiserror::Error;

/// Failures of a routing turn.
#[derive(Error, Debug)]
pub enum RouterError {
    /// The session identifier is unusable.
    #[error("Invalid session id: {0}")]
    InvalidSession(String),

    /// The confidence policy refused the classification.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A decision was made but dispatch to its agent failed. The decision
    /// travels with the error so callers can report what was attempted.
    #[error("{source}")]
    Dispatch {
        decision: Box<RoutingDecision>,
        source: DispatchError,
    },
}
