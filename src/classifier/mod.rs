//! Intent classification module.
//!
//! Two classifiers sit behind one pipeline: a primary LLM tool-calling
//! classifier and a deterministic keyword fallback. The pipeline guarantees
//! a candidate for every message: any primary failure, and any primary
//! candidate naming an unconfigured agent, is absorbed and the fallback
//! answers instead.

pub mod catalog;
pub mod error;
pub mod keyword;
pub mod toolcall;

pub use catalog::{ToolCatalog, ToolDefinition};
pub use error::ClassifierError;
pub use keyword::KeywordClassifier;
pub use toolcall::ToolCallClassifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// A proposed routing target produced by a classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentCandidate {
    /// Name of the proposed downstream agent
    pub agent: String,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Parameters extracted from the message, forwarded on dispatch
    pub parameters: Map<String, Value>,
    /// Human-readable explanation of the selection, when available
    pub rationale: Option<String>,
}

/// Which classifier produced the accepted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Primary,
    Fallback,
}

impl std::fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationSource::Primary => write!(f, "primary"),
            ClassificationSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A classifier that proposes an agent for a message.
///
/// Object-safe so the pipeline can hold the primary behind a trait object
/// and tests can substitute scripted implementations.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Propose a candidate for the message.
    async fn classify(
        &self,
        message: &str,
        context: Option<&Value>,
    ) -> Result<IntentCandidate, ClassifierError>;
}

/// Primary-with-fallback classification pipeline.
///
/// The fallback is infallible and performs no I/O, so `classify` always
/// produces a candidate.
pub struct ClassificationPipeline {
    primary: Option<Arc<dyn IntentClassifier>>,
    fallback: KeywordClassifier,
    /// Configured agent names; a primary candidate outside this set is
    /// treated as a primary failure.
    known_agents: HashSet<String>,
}

impl ClassificationPipeline {
    pub fn new(
        primary: Option<Arc<dyn IntentClassifier>>,
        fallback: KeywordClassifier,
        agent_names: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            primary,
            fallback,
            known_agents: agent_names.into_iter().collect(),
        }
    }

    /// Classify a message, trying the primary first.
    ///
    /// Returns the accepted candidate and which classifier produced it.
    pub async fn classify(
        &self,
        message: &str,
        context: Option<&Value>,
    ) -> (IntentCandidate, ClassificationSource) {
        if let Some(primary) = &self.primary {
            match primary.classify(message, context).await {
                Ok(candidate) if self.known_agents.contains(&candidate.agent) => {
                    debug!(
                        classifier = primary.name(),
                        agent = %candidate.agent,
                        confidence = candidate.confidence,
                        "Primary classification accepted"
                    );
                    return (candidate, ClassificationSource::Primary);
                }
                Ok(candidate) => {
                    warn!(
                        classifier = primary.name(),
                        agent = %candidate.agent,
                        "Primary proposed an unconfigured agent, using fallback"
                    );
                }
                Err(e) => {
                    warn!(
                        classifier = primary.name(),
                        error = %e,
                        "Primary classifier unavailable, using fallback"
                    );
                }
            }
        }

        let candidate = self.fallback.classify(message);
        debug!(
            agent = %candidate.agent,
            confidence = candidate.confidence,
            "Fallback classification"
        );
        (candidate, ClassificationSource::Fallback)
    }

    /// Whether a primary classifier is configured.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgentConfig, PolicyConfig};
    use crate::registry::AgentRegistry;

    /// Scripted primary for pipeline tests.
    struct ScriptedClassifier {
        result: std::sync::Mutex<Option<Result<IntentCandidate, ClassifierError>>>,
    }

    impl ScriptedClassifier {
        fn ok(agent: &str, confidence: f64) -> Self {
            Self {
                result: std::sync::Mutex::new(Some(Ok(IntentCandidate {
                    agent: agent.to_string(),
                    confidence,
                    parameters: Map::new(),
                    rationale: None,
                }))),
            }
        }

        fn err(error: ClassifierError) -> Self {
            Self {
                result: std::sync::Mutex::new(Some(Err(error))),
            }
        }
    }

    #[async_trait]
    impl IntentClassifier for ScriptedClassifier {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn classify(
            &self,
            _message: &str,
            _context: Option<&Value>,
        ) -> Result<IntentCandidate, ClassifierError> {
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("scripted classifier called more than once")
        }
    }

    fn test_pipeline(primary: Option<Arc<dyn IntentClassifier>>) -> ClassificationPipeline {
        let registry = AgentRegistry::from_config(&AgentConfig::default_catalog()).unwrap();
        let fallback = KeywordClassifier::new(&registry.all(), &PolicyConfig::default());
        ClassificationPipeline::new(primary, fallback, registry.names().to_vec())
    }

    #[tokio::test]
    async fn test_primary_result_wins() {
        let pipeline = test_pipeline(Some(Arc::new(ScriptedClassifier::ok("client_agent", 0.95))));

        let (candidate, source) = pipeline.classify("about the acme account", None).await;
        assert_eq!(candidate.agent, "client_agent");
        assert_eq!(source, ClassificationSource::Primary);
    }

    #[tokio::test]
    async fn test_primary_error_falls_back() {
        let pipeline = test_pipeline(Some(Arc::new(ScriptedClassifier::err(
            ClassifierError::Timeout(10_000),
        ))));

        let (candidate, source) = pipeline
            .classify("show me the ethics policy", None)
            .await;
        assert_eq!(source, ClassificationSource::Fallback);
        assert_eq!(candidate.agent, "document_agent");
    }

    #[tokio::test]
    async fn test_primary_no_selection_falls_back() {
        let pipeline = test_pipeline(Some(Arc::new(ScriptedClassifier::err(
            ClassifierError::NoSelection,
        ))));

        let (candidate, source) = pipeline.classify("hello", None).await;
        assert_eq!(source, ClassificationSource::Fallback);
        assert_eq!(candidate.agent, "general_agent");
    }

    #[tokio::test]
    async fn test_unknown_agent_from_primary_falls_back() {
        let pipeline = test_pipeline(Some(Arc::new(ScriptedClassifier::ok("ghost_agent", 0.99))));

        let (candidate, source) = pipeline
            .classify("show me the ethics policy", None)
            .await;
        assert_eq!(source, ClassificationSource::Fallback);
        assert_eq!(candidate.agent, "document_agent");
    }

    #[tokio::test]
    async fn test_no_primary_goes_straight_to_fallback() {
        let pipeline = test_pipeline(None);
        assert!(!pipeline.has_primary());

        let (candidate, source) = pipeline.classify("hello", None).await;
        assert_eq!(source, ClassificationSource::Fallback);
        assert_eq!(candidate.agent, "general_agent");
        assert_eq!(candidate.confidence, 0.3);
    }
}
