//! The routing core.
//!
//! One entry point, [`Router::classify_and_route`], runs the whole turn:
//! validate the session id, classify the message, apply the confidence
//! policy against the session's state, dispatch to the selected agent, and
//! record the outcome. Turns within one session serialize on the session's
//! lock; distinct sessions route concurrently.

mod error;

pub use error::RouterError;

use crate::classifier::ClassificationPipeline;
use crate::config::PolicyConfig;
use crate::dispatch::{AgentReply, Dispatcher, RoutingMeta};
use crate::policy::{self, RoutingDecision};
use crate::registry::AgentRegistry;
use crate::session::{DispatchOutcome, SessionStore};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// Longest accepted session identifier.
const MAX_SESSION_ID_LEN: usize = 128;

/// A completed routing turn.
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub decision: RoutingDecision,
    /// Parameters the classifier extracted and the dispatcher forwarded
    pub parameters: Map<String, Value>,
    pub rationale: Option<String>,
    pub reply: AgentReply,
}

/// The intent dispatch router.
pub struct Router {
    registry: Arc<AgentRegistry>,
    pipeline: ClassificationPipeline,
    dispatcher: Dispatcher,
    sessions: SessionStore,
    policy: PolicyConfig,
}

impl Router {
    pub fn new(
        registry: Arc<AgentRegistry>,
        pipeline: ClassificationPipeline,
        dispatcher: Dispatcher,
        policy: PolicyConfig,
    ) -> Self {
        Self {
            registry,
            pipeline,
            dispatcher,
            sessions: SessionStore::new(),
            policy,
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn validate_session_id(session_id: &str) -> Result<(), RouterError> {
        let trimmed = session_id.trim();
        if trimmed.is_empty() {
            return Err(RouterError::InvalidSession(
                "session id must not be empty".to_string(),
            ));
        }
        if session_id.len() > MAX_SESSION_ID_LEN {
            return Err(RouterError::InvalidSession(format!(
                "session id exceeds {} characters",
                MAX_SESSION_ID_LEN
            )));
        }
        Ok(())
    }

    /// Route one message: classify, decide, dispatch, record.
    #[instrument(skip_all, fields(session_id = %session_id))]
    pub async fn classify_and_route(
        &self,
        message: &str,
        session_id: &str,
        context: Option<&Value>,
    ) -> Result<RouteOutcome, RouterError> {
        Self::validate_session_id(session_id)?;

        let session = self.sessions.get_or_create(session_id);
        let mut state = session.lock().await;

        let (candidate, source) = self.pipeline.classify(message, context).await;

        let decision = policy::decide(&candidate, source, message, &state, &self.policy)?;

        info!(
            agent = %decision.selected_agent,
            confidence = decision.confidence,
            source = %decision.source,
            switched = decision.switched,
            low_confidence = decision.low_confidence,
            "Routing decision"
        );

        let routing = RoutingMeta {
            selected_agent: decision.selected_agent.clone(),
            confidence: decision.confidence,
            source: decision.source,
        };

        match self
            .dispatcher
            .dispatch(routing, message, session_id, &candidate.parameters)
            .await
        {
            Ok(reply) => {
                state.apply(decision.clone(), DispatchOutcome::Delivered);
                Ok(RouteOutcome {
                    decision,
                    parameters: candidate.parameters,
                    rationale: candidate.rationale,
                    reply,
                })
            }
            Err(e) => {
                state.apply(
                    decision.clone(),
                    DispatchOutcome::Failed {
                        error: e.to_string(),
                    },
                );
                Err(RouterError::Dispatch {
                    decision: Box::new(decision),
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::KeywordClassifier;
    use crate::config::AgentConfig;

    fn test_router(configs: &[AgentConfig]) -> Router {
        let registry = Arc::new(AgentRegistry::from_config(configs).unwrap());
        let policy = PolicyConfig::default();
        let fallback = KeywordClassifier::new(&registry.all(), &policy);
        let pipeline = ClassificationPipeline::new(None, fallback, registry.names().to_vec());
        let dispatcher = Dispatcher::new(registry.clone(), Arc::new(reqwest::Client::new()));
        Router::new(registry, pipeline, dispatcher, policy)
    }

    #[tokio::test]
    async fn test_empty_session_id_rejected_before_classification() {
        let router = test_router(&AgentConfig::default_catalog());

        let result = router.classify_and_route("hello", "   ", None).await;
        assert!(matches!(result, Err(RouterError::InvalidSession(_))));
        assert_eq!(router.session_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_session_id_rejected() {
        let router = test_router(&AgentConfig::default_catalog());
        let long_id = "x".repeat(129);

        let result = router.classify_and_route("hello", &long_id, None).await;
        assert!(matches!(result, Err(RouterError::InvalidSession(_))));
    }

    #[tokio::test]
    async fn test_dispatch_failure_carries_decision_and_updates_session() {
        // Unreachable agents so every dispatch fails
        let mut configs = AgentConfig::default_catalog();
        for config in &mut configs {
            config.url = "http://127.0.0.1:9/".to_string();
            config.retries = 0;
            config.timeout_ms = 1_000;
        }
        let router = test_router(&configs);

        let err = router
            .classify_and_route("show me the ethics policy", "s1", None)
            .await
            .unwrap_err();

        match err {
            RouterError::Dispatch { decision, .. } => {
                assert_eq!(decision.selected_agent, "document_agent");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(router.session_count(), 1);
    }
}
