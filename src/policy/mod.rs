//! Confidence policy.
//!
//! Pure decision logic between classification and dispatch: given a
//! candidate and the session's routing state, decide which agent actually
//! receives the message. Stickiness is the default posture — an established
//! session keeps its agent unless the new candidate clears the switch
//! margin, the user explicitly asks to switch, or the current agent keeps
//! failing.

mod error;

pub use error::PolicyError;

use crate::classifier::{ClassificationSource, IntentCandidate};
use crate::config::PolicyConfig;
use crate::session::SessionRouteState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A finalized routing decision. Immutable once produced; outcomes are
/// recorded alongside it in session history, never written back into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub selected_agent: String,
    pub confidence: f64,
    pub source: ClassificationSource,
    /// Accepted below the confidence threshold
    pub low_confidence: bool,
    /// This decision changes the session's agent
    pub switched: bool,
    pub timestamp: DateTime<Utc>,
}

/// Case-insensitive scan for an explicit switch request.
fn has_switch_phrase(message: &str, phrases: &[String]) -> bool {
    let lowered = message.to_lowercase();
    phrases
        .iter()
        .any(|phrase| lowered.contains(&phrase.to_lowercase()))
}

/// Decide the routing target for one message.
///
/// # Errors
///
/// Returns `PolicyError::LowConfidenceRejected` only when strict mode is
/// enabled and a session with no established agent gets a sub-threshold
/// candidate.
pub fn decide(
    candidate: &IntentCandidate,
    source: ClassificationSource,
    message: &str,
    session: &SessionRouteState,
    config: &PolicyConfig,
) -> Result<RoutingDecision, PolicyError> {
    let low_confidence = candidate.confidence < config.confidence_threshold;

    let current = match &session.current_agent {
        Some(current) => current,
        None => {
            // First routable turn of the session
            if low_confidence && config.strict_low_confidence {
                return Err(PolicyError::LowConfidenceRejected {
                    agent: candidate.agent.clone(),
                    confidence: candidate.confidence,
                    threshold: config.confidence_threshold,
                });
            }
            return Ok(RoutingDecision {
                selected_agent: candidate.agent.clone(),
                confidence: candidate.confidence,
                source,
                low_confidence,
                switched: false,
                timestamp: Utc::now(),
            });
        }
    };

    if candidate.agent == *current {
        // Same agent: refresh the confidence baseline
        return Ok(RoutingDecision {
            selected_agent: candidate.agent.clone(),
            confidence: candidate.confidence,
            source,
            low_confidence,
            switched: false,
            timestamp: Utc::now(),
        });
    }

    // The candidate disagrees with the session's agent. Work out whether a
    // switch is permitted.
    let escalated = session.consecutive_failures >= config.repeat_failure_threshold;
    let explicit = has_switch_phrase(message, &config.switch_phrases);
    let clears_margin = match session.last_confidence() {
        Some(last) => candidate.confidence > last + config.switch_margin,
        None => true,
    };
    let under_cap = session.switch_count < config.max_switches;

    let permitted = escalated || ((explicit || clears_margin) && under_cap);

    if permitted {
        debug!(
            session_id = %session.session_id,
            from = %current,
            to = %candidate.agent,
            escalated,
            explicit,
            "Switching session agent"
        );
        Ok(RoutingDecision {
            selected_agent: candidate.agent.clone(),
            confidence: candidate.confidence,
            source,
            low_confidence,
            switched: true,
            timestamp: Utc::now(),
        })
    } else {
        // Stay with the established agent at its last known confidence
        let confidence = session.last_confidence().unwrap_or(candidate.confidence);
        debug!(
            session_id = %session.session_id,
            kept = %current,
            rejected = %candidate.agent,
            candidate_confidence = candidate.confidence,
            "Switch suppressed, keeping current agent"
        );
        Ok(RoutingDecision {
            selected_agent: current.clone(),
            confidence,
            source,
            low_confidence: confidence < config.confidence_threshold,
            switched: false,
            timestamp: Utc::now(),
        })
    }
}
