//! Configuration module for Switchboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SWITCHBOARD_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use switchboard::config::SwitchboardConfig;
//!
//! // Load defaults
//! let config = SwitchboardConfig::default();
//! assert_eq!(config.server.port, 8001);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: SwitchboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod agent;
pub mod classifier;
pub mod error;
pub mod logging;
pub mod policy;
pub mod server;

pub use agent::{AgentConfig, Keyword};
pub use classifier::ClassifierConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use policy::PolicyConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Switchboard router.
///
/// Aggregates the server settings, classifier settings, confidence policy,
/// agent catalog, and logging configuration. The default agent catalog is the
/// four-agent set from [`AgentConfig::default_catalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchboardConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Primary classifier configuration
    pub classifier: ClassifierConfig,
    /// Confidence policy tunables
    pub policy: PolicyConfig,
    /// Downstream agent catalog, in priority order
    pub agents: Vec<AgentConfig>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for SwitchboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            classifier: ClassifierConfig::default(),
            policy: PolicyConfig::default(),
            agents: AgentConfig::default_catalog(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SwitchboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports SWITCHBOARD_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("SWITCHBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("SWITCHBOARD_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("SWITCHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SWITCHBOARD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(classifier) = std::env::var("SWITCHBOARD_CLASSIFIER") {
            self.classifier.enabled = classifier.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.agents.is_empty() {
            return Err(ConfigError::Validation {
                field: "agents".to_string(),
                message: "at least one agent must be configured".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for (i, agent) in self.agents.iter().enumerate() {
            if agent.name.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("agents[{}].name", i),
                    message: "name cannot be empty".to_string(),
                });
            }
            if agent.url.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("agents[{}].url", i),
                    message: "URL cannot be empty".to_string(),
                });
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::Validation {
                    field: format!("agents[{}].name", i),
                    message: format!("duplicate agent name '{}'", agent.name),
                });
            }
            for (k, keyword) in agent.keywords.iter().enumerate() {
                if !(0.0..=1.0).contains(&keyword.weight) || keyword.weight == 0.0 {
                    return Err(ConfigError::Validation {
                        field: format!("agents[{}].keywords[{}].weight", i, k),
                        message: "keyword weight must be in (0, 1]".to_string(),
                    });
                }
            }
        }

        if !self.agents.iter().any(|a| a.name == self.policy.default_agent) {
            return Err(ConfigError::Validation {
                field: "policy.default_agent".to_string(),
                message: format!(
                    "default agent '{}' is not in the configured agent set",
                    self.policy.default_agent
                ),
            });
        }

        if !(0.0..=1.0).contains(&self.policy.confidence_threshold) {
            return Err(ConfigError::Validation {
                field: "policy.confidence_threshold".to_string(),
                message: "must be in [0, 1]".to_string(),
            });
        }
        if self.policy.switch_margin < 0.0 {
            return Err(ConfigError::Validation {
                field: "policy.switch_margin".to_string(),
                message: "must be non-negative".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.policy.fallback_floor) {
            return Err(ConfigError::Validation {
                field: "policy.fallback_floor".to_string(),
                message: "must be in [0, 1]".to_string(),
            });
        }

        Ok(())
    }
}
