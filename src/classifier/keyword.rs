//! Deterministic keyword fallback classifier.
//!
//! A pure function over the lower-cased message: each agent is scored by the
//! summed weight of its matched keywords (capped at 1.0). When no agent
//! clears the epsilon floor, the configured default agent is selected at a
//! fixed low confidence so that every message gets a destination.

use super::IntentCandidate;
use crate::config::{Keyword, PolicyConfig};
use crate::registry::AgentEndpoint;
use serde_json::{Map, Value};

/// Keyword table entry for one agent.
#[derive(Debug, Clone)]
struct AgentKeywords {
    agent: String,
    keywords: Vec<Keyword>,
}

/// Deterministic fallback classifier. Performs no I/O.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    /// Agents in configured priority order; ties keep the earliest entry.
    table: Vec<AgentKeywords>,
    default_agent: String,
    fallback_floor: f64,
    epsilon: f64,
}

impl KeywordClassifier {
    pub fn new(endpoints: &[AgentEndpoint], policy: &PolicyConfig) -> Self {
        let table = endpoints
            .iter()
            .map(|endpoint| AgentKeywords {
                agent: endpoint.name.clone(),
                keywords: endpoint.keywords.clone(),
            })
            .collect();

        Self {
            table,
            default_agent: policy.default_agent.clone(),
            fallback_floor: policy.fallback_floor,
            epsilon: policy.epsilon,
        }
    }

    /// Score one agent's keyword list against a lower-cased message.
    ///
    /// Returns the capped score and the matched keywords.
    fn score(keywords: &[Keyword], lowered: &str) -> (f64, Vec<String>) {
        let mut score = 0.0;
        let mut matched = Vec::new();
        for keyword in keywords {
            if lowered.contains(&keyword.word.to_lowercase()) {
                score += keyword.weight;
                matched.push(keyword.word.clone());
            }
        }
        (score.min(1.0), matched)
    }

    /// Classify a message. Identical inputs always produce identical output.
    pub fn classify(&self, message: &str) -> IntentCandidate {
        let lowered = message.to_lowercase();

        let mut best: Option<(f64, &str, Vec<String>)> = None;
        for entry in &self.table {
            let (score, matched) = Self::score(&entry.keywords, &lowered);
            // Strictly-greater keeps the earliest (highest-priority) agent on ties
            let is_better = match &best {
                Some((best_score, _, _)) => score > *best_score,
                None => score > 0.0,
            };
            if is_better {
                best = Some((score, &entry.agent, matched));
            }
        }

        match best {
            Some((score, agent, matched)) if score > self.epsilon => {
                let mut parameters = Map::new();
                parameters.insert("message".to_string(), Value::String(message.to_string()));
                IntentCandidate {
                    agent: agent.to_string(),
                    confidence: score,
                    parameters,
                    rationale: Some(format!("keyword match: {}", matched.join(", "))),
                }
            }
            _ => {
                let mut parameters = Map::new();
                parameters.insert("message".to_string(), Value::String(message.to_string()));
                IntentCandidate {
                    agent: self.default_agent.clone(),
                    confidence: self.fallback_floor,
                    parameters,
                    rationale: Some("no keyword match, default agent".to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgentConfig, PolicyConfig};
    use crate::registry::AgentRegistry;

    fn test_classifier() -> KeywordClassifier {
        let registry = AgentRegistry::from_config(&AgentConfig::default_catalog()).unwrap();
        KeywordClassifier::new(&registry.all(), &PolicyConfig::default())
    }

    #[test]
    fn test_policy_message_selects_document_agent() {
        let classifier = test_classifier();
        let candidate = classifier.classify("show me the ethics policy document");

        assert_eq!(candidate.agent, "document_agent");
        // "ethics" + "policy" + "document" at 0.2 each
        assert!(candidate.confidence >= 0.2);
    }

    #[test]
    fn test_unmatched_message_selects_default_agent() {
        let classifier = test_classifier();
        let candidate = classifier.classify("hello");

        assert_eq!(candidate.agent, "general_agent");
        assert_eq!(candidate.confidence, 0.3);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = test_classifier();
        let a = classifier.classify("how is staff attendance this month");
        let b = classifier.classify("how is staff attendance this month");

        assert_eq!(a.agent, b.agent);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.agent, "employee_agent");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let classifier = test_classifier();
        let candidate = classifier.classify("SHOW ME THE ETHICS POLICY");
        assert_eq!(candidate.agent, "document_agent");
    }

    #[test]
    fn test_score_caps_at_one() {
        let endpoints: Vec<_> = {
            let mut configs = AgentConfig::default_catalog();
            for keyword in &mut configs[0].keywords {
                keyword.weight = 0.9;
            }
            let registry = AgentRegistry::from_config(&configs).unwrap();
            registry.all()
        };
        let classifier = KeywordClassifier::new(&endpoints, &PolicyConfig::default());

        let candidate = classifier.classify("ethics policy regulation document");
        assert_eq!(candidate.confidence, 1.0);
    }

    #[test]
    fn test_tie_resolves_by_priority_order() {
        // Same keyword and weight for two agents; the earlier entry wins.
        let mut configs = AgentConfig::default_catalog();
        configs[1].keywords = vec![crate::config::Keyword::new("policy")];
        let registry = AgentRegistry::from_config(&configs).unwrap();
        let classifier = KeywordClassifier::new(&registry.all(), &PolicyConfig::default());

        let candidate = classifier.classify("what is the policy");
        assert_eq!(candidate.agent, "document_agent");
    }

    #[test]
    fn test_parameters_carry_message() {
        let classifier = test_classifier();
        let candidate = classifier.classify("show me the ethics policy");
        assert_eq!(
            candidate.parameters.get("message").and_then(|v| v.as_str()),
            Some("show me the ethics policy")
        );
    }
}
