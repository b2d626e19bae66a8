//! Shared test utilities for Switchboard integration tests.
//!
//! Provides reusable helpers for building configs pointed at mock agent
//! servers, and for standing up the full routing app.

#![allow(dead_code)]

use std::sync::Arc;
use switchboard::api::{create_router, AppState};
use switchboard::config::{AgentConfig, SwitchboardConfig};

/// Build the default catalog with every agent URL rewritten to a mock
/// server. Each agent keeps its own path so a single mock server can
/// distinguish the targets.
pub fn catalog_against(base_url: &str) -> Vec<AgentConfig> {
    let mut configs = AgentConfig::default_catalog();
    for config in &mut configs {
        let path = config
            .url
            .rsplit('/')
            .next()
            .map(str::to_string)
            .unwrap_or_default();
        config.url = format!("{}/{}", base_url, path);
        config.timeout_ms = 2_000;
    }
    configs
}

/// Config with agents against a mock server and the primary classifier
/// disabled, so classification is deterministic.
pub fn fallback_only_config(agent_base_url: &str) -> SwitchboardConfig {
    let mut config = SwitchboardConfig::default();
    config.agents = catalog_against(agent_base_url);
    config.classifier.enabled = false;
    config
}

/// Config with agents and classifier both pointed at mock servers.
pub fn full_config(agent_base_url: &str, classifier_base_url: &str) -> SwitchboardConfig {
    let mut config = fallback_only_config(agent_base_url);
    config.classifier.enabled = true;
    config.classifier.url = classifier_base_url.to_string();
    config.classifier.api_key_env = None;
    config.classifier.timeout_ms = 2_000;
    config
}

/// Stand up the full HTTP app over a config.
pub fn make_app(config: SwitchboardConfig) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Arc::new(config)).unwrap());
    (create_router(Arc::clone(&state)), state)
}
