//! Per-session routing state.
//!
//! Each session carries its current agent, a bounded view of its routing
//! history, and the counters the confidence policy consults: switch count
//! and consecutive dispatch failures. State only advances through
//! [`SessionRouteState::apply`], which couples every mutation to a completed
//! dispatch outcome.

use crate::policy::RoutingDecision;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of dispatching a decision to its agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DispatchOutcome {
    /// Agent accepted the request and replied
    Delivered,
    /// All dispatch attempts failed
    Failed { error: String },
}

/// One completed routing turn: the decision and how its dispatch ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision: RoutingDecision,
    pub outcome: DispatchOutcome,
}

/// Routing state of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRouteState {
    pub session_id: String,
    /// Agent the session is currently bound to, once a dispatch succeeds
    pub current_agent: Option<String>,
    /// Completed agent changes; never decreases within a session
    pub switch_count: u32,
    /// Consecutive failed dispatches to the current agent
    pub consecutive_failures: u32,
    pub history: Vec<DecisionRecord>,
}

impl SessionRouteState {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            current_agent: None,
            switch_count: 0,
            consecutive_failures: 0,
            history: Vec::new(),
        }
    }

    /// Confidence of the most recent delivered decision for the current
    /// agent. This is the baseline the switch margin is measured against.
    pub fn last_confidence(&self) -> Option<f64> {
        let current = self.current_agent.as_deref()?;
        self.history
            .iter()
            .rev()
            .find(|record| {
                record.outcome == DispatchOutcome::Delivered
                    && record.decision.selected_agent == current
            })
            .map(|record| record.decision.confidence)
    }

    /// Record a completed routing turn.
    ///
    /// On delivery the session binds to the decision's agent, counts the
    /// switch if one happened, and resets the failure streak. On failure the
    /// turn is recorded and the failure streak grows only when the failed
    /// agent is the session's current agent; a failed switch attempt leaves
    /// the binding untouched.
    pub fn apply(&mut self, decision: RoutingDecision, outcome: DispatchOutcome) {
        match &outcome {
            DispatchOutcome::Delivered => {
                if decision.switched {
                    self.switch_count += 1;
                }
                self.current_agent = Some(decision.selected_agent.clone());
                self.consecutive_failures = 0;
            }
            DispatchOutcome::Failed { .. } => {
                match &self.current_agent {
                    Some(current) if *current == decision.selected_agent => {
                        self.consecutive_failures += 1;
                    }
                    None => {
                        // No binding yet: failures still accumulate so a
                        // dead first choice can be escaped.
                        self.consecutive_failures += 1;
                    }
                    Some(_) => {}
                }
            }
        }
        self.history.push(DecisionRecord { decision, outcome });
    }
}

/// Concurrent store of session routing state.
///
/// Each session is wrapped in its own async mutex so turns within one
/// session serialize while distinct sessions proceed in parallel.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<SessionRouteState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a session's state, creating it on first use.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<SessionRouteState>> {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SessionRouteState::new(session_id))))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn remove(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassificationSource;
    use crate::policy::RoutingDecision;

    fn decision(agent: &str, confidence: f64, switched: bool) -> RoutingDecision {
        RoutingDecision {
            selected_agent: agent.to_string(),
            confidence,
            source: ClassificationSource::Primary,
            low_confidence: false,
            switched,
            timestamp: chrono::Utc::now(),
        }
    }

    fn failed() -> DispatchOutcome {
        DispatchOutcome::Failed {
            error: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_delivery_binds_current_agent() {
        let mut state = SessionRouteState::new("s1");
        state.apply(decision("document_agent", 0.9, false), DispatchOutcome::Delivered);

        assert_eq!(state.current_agent.as_deref(), Some("document_agent"));
        assert_eq!(state.switch_count, 0);
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.last_confidence(), Some(0.9));
    }

    #[test]
    fn test_delivered_switch_increments_count() {
        let mut state = SessionRouteState::new("s1");
        state.apply(decision("document_agent", 0.9, false), DispatchOutcome::Delivered);
        state.apply(decision("client_agent", 0.95, true), DispatchOutcome::Delivered);

        assert_eq!(state.current_agent.as_deref(), Some("client_agent"));
        assert_eq!(state.switch_count, 1);
        assert_eq!(state.last_confidence(), Some(0.95));
    }

    #[test]
    fn test_failed_dispatch_keeps_binding() {
        let mut state = SessionRouteState::new("s1");
        state.apply(decision("document_agent", 0.9, false), DispatchOutcome::Delivered);
        state.apply(decision("document_agent", 0.9, false), failed());

        assert_eq!(state.current_agent.as_deref(), Some("document_agent"));
        assert_eq!(state.consecutive_failures, 1);
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_failure_streak_resets_on_delivery() {
        let mut state = SessionRouteState::new("s1");
        state.apply(decision("document_agent", 0.9, false), DispatchOutcome::Delivered);
        state.apply(decision("document_agent", 0.9, false), failed());
        state.apply(decision("document_agent", 0.9, false), failed());
        assert_eq!(state.consecutive_failures, 2);

        state.apply(decision("document_agent", 0.9, false), DispatchOutcome::Delivered);
        assert_eq!(state.consecutive_failures, 0);
    }

    #[test]
    fn test_failed_switch_attempt_does_not_touch_binding_or_streak() {
        let mut state = SessionRouteState::new("s1");
        state.apply(decision("document_agent", 0.9, false), DispatchOutcome::Delivered);
        state.apply(decision("client_agent", 0.99, true), failed());

        assert_eq!(state.current_agent.as_deref(), Some("document_agent"));
        assert_eq!(state.switch_count, 0);
        assert_eq!(state.consecutive_failures, 0);
    }

    #[test]
    fn test_failure_before_any_binding_counts() {
        let mut state = SessionRouteState::new("s1");
        state.apply(decision("document_agent", 0.9, false), failed());

        assert!(state.current_agent.is_none());
        assert_eq!(state.consecutive_failures, 1);
    }

    #[test]
    fn test_last_confidence_skips_failed_records() {
        let mut state = SessionRouteState::new("s1");
        state.apply(decision("document_agent", 0.8, false), DispatchOutcome::Delivered);
        state.apply(decision("document_agent", 0.95, false), failed());

        assert_eq!(state.last_confidence(), Some(0.8));
    }

    #[test]
    fn test_store_get_or_create() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let first = store.get_or_create("s1");
        let second = store.get_or_create("s1");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);

        store.get_or_create("s2");
        assert_eq!(store.len(), 2);

        assert!(store.remove("s1"));
        assert!(!store.remove("s1"));
        assert_eq!(store.len(), 1);
    }
}
