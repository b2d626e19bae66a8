//! Agent endpoint types.

use crate::config::{AgentConfig, Keyword};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Advisory health of a downstream agent.
///
/// Health is supplied by an external health-check collaborator and is never
/// probed by the router itself. An unhealthy agent is still dispatched to;
/// the status only enriches failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentHealth {
    /// Agent responded to its last external health check
    Healthy,
    /// Agent failed its last external health check
    Unhealthy,
    /// No health report received yet
    #[default]
    Unknown,
}

/// A downstream agent endpoint.
///
/// Read-mostly configuration plus the advisory health fields, which are the
/// only parts mutated after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEndpoint {
    /// Agent name, unique across the configured set
    pub name: String,
    /// Full invoke URL
    pub url: String,
    /// Description offered to the primary classifier
    pub description: String,
    /// Tool name in the classifier catalog
    pub tool_name: String,
    /// Weighted keywords for the fallback classifier
    pub keywords: Vec<Keyword>,
    /// Tool parameter schema
    pub parameters: serde_json::Value,
    /// Per-attempt dispatch timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries after the first failed attempt
    pub retries: u32,
    /// Last health report from the external collaborator
    pub health: AgentHealth,
    /// When the last health report arrived
    pub last_health_update: Option<DateTime<Utc>>,
    /// Last reported error detail, if any
    pub last_error: Option<String>,
}

impl AgentEndpoint {
    /// Per-attempt timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl From<&AgentConfig> for AgentEndpoint {
    fn from(config: &AgentConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            description: config.description.clone(),
            tool_name: config.tool().to_string(),
            keywords: config.keywords.clone(),
            parameters: config.parameters.clone(),
            timeout_ms: config.timeout_ms,
            retries: config.retries,
            health: AgentHealth::Unknown,
            last_health_update: None,
            last_error: None,
        }
    }
}
