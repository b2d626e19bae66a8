//! Dispatch error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a dispatch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchErrorKind {
    /// An attempt exceeded the endpoint's per-attempt deadline
    Timeout,
    /// The agent could not be reached (DNS, connection refused)
    Unreachable,
    /// The agent answered with a non-success status or an unparsable body
    Protocol,
}

impl std::fmt::Display for DispatchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchErrorKind::Timeout => write!(f, "timeout"),
            DispatchErrorKind::Unreachable => write!(f, "unreachable"),
            DispatchErrorKind::Protocol => write!(f, "protocol"),
        }
    }
}

/// All attempts to deliver a message to an agent failed.
#[derive(Error, Debug)]
#[error("Dispatch to '{agent}' failed after {attempts} attempt(s) ({kind}): {detail}")]
pub struct DispatchError {
    pub agent: String,
    pub kind: DispatchErrorKind,
    /// Attempts actually made, including the first
    pub attempts: u32,
    /// The registry already marked this endpoint unhealthy before the call
    pub endpoint_was_unhealthy: bool,
    pub detail: String,
}
