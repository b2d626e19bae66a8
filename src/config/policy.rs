//! Confidence policy configuration

use serde::{Deserialize, Serialize};

/// Tunables for turning classifier output into routing decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Candidates at or above this confidence are accepted outright.
    /// Production deployments should raise this (e.g., 0.7).
    pub confidence_threshold: f64,
    /// Switching away from the session's current agent requires confidence
    /// strictly greater than the previous decision's confidence plus this
    /// margin, unless a switch phrase is present.
    pub switch_margin: f64,
    /// Hard cap on agent switches per session.
    pub max_switches: u32,
    /// Consecutive dispatch failures of the current agent before the policy
    /// permits a switch regardless of margin or cap.
    pub repeat_failure_threshold: u32,
    /// Agent selected by the fallback classifier when nothing matches.
    pub default_agent: String,
    /// Confidence assigned to the default-agent fallback.
    pub fallback_floor: f64,
    /// Keyword scores at or below epsilon count as "no match".
    pub epsilon: f64,
    /// Phrases that explicitly request a switch and bypass the margin.
    pub switch_phrases: Vec<String>,
    /// Reject low-confidence first-time classifications instead of
    /// accepting them (availability-over-precision is the default).
    pub strict_low_confidence: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            switch_margin: 0.15,
            max_switches: 5,
            repeat_failure_threshold: 2,
            default_agent: "general_agent".to_string(),
            fallback_floor: 0.3,
            epsilon: 0.05,
            switch_phrases: vec![
                "switch to".to_string(),
                "talk to".to_string(),
                "instead".to_string(),
                "different agent".to_string(),
            ],
            strict_low_confidence: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_config_defaults() {
        let config = PolicyConfig::default();
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.switch_margin, 0.15);
        assert_eq!(config.max_switches, 5);
        assert_eq!(config.default_agent, "general_agent");
        assert_eq!(config.fallback_floor, 0.3);
        assert!(!config.strict_low_confidence);
    }

    #[test]
    fn test_policy_config_toml_override() {
        let toml = r#"
        confidence_threshold = 0.7
        max_switches = 2
        strict_low_confidence = true
        "#;
        let config: PolicyConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.confidence_threshold, 0.7);
        assert_eq!(config.max_switches, 2);
        assert!(config.strict_low_confidence);
        // Unset fields keep defaults
        assert_eq!(config.switch_margin, 0.15);
    }
}
