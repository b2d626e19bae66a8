//! Agent Registry module.
//!
//! Thread-safe in-memory storage of the configured downstream agent
//! endpoints. The endpoint set is fixed at startup; only the advisory health
//! fields change afterwards, pushed by the external health-check
//! collaborator through [`AgentRegistry::update_health`].

mod endpoint;
mod error;

pub use endpoint::*;
pub use error::*;

use crate::config::AgentConfig;
use dashmap::DashMap;

/// The Agent Registry stores all configured downstream agents.
///
/// Uses a lock-free concurrent map (DashMap) so the route path never
/// serializes on registry reads. The configured ordering is preserved
/// separately because it doubles as the tie-breaking priority order.
pub struct AgentRegistry {
    agents: DashMap<String, AgentEndpoint>,
    /// Agent names in configured (priority) order
    order: Vec<String>,
}

impl AgentRegistry {
    /// Build a registry from the configured agent catalog.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateAgent` if two agents share a name.
    pub fn from_config(configs: &[AgentConfig]) -> Result<Self, RegistryError> {
        let agents = DashMap::new();
        let mut order = Vec::with_capacity(configs.len());

        for config in configs {
            if agents.contains_key(&config.name) {
                return Err(RegistryError::DuplicateAgent(config.name.clone()));
            }
            agents.insert(config.name.clone(), AgentEndpoint::from(config));
            order.push(config.name.clone());
        }

        Ok(Self { agents, order })
    }

    /// Get an endpoint by agent name.
    ///
    /// Returns a cloned copy; endpoints are small and read-mostly.
    pub fn get(&self, name: &str) -> Option<AgentEndpoint> {
        self.agents.get(name).map(|entry| entry.value().clone())
    }

    /// Whether an agent with this name is configured.
    pub fn contains(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    /// All endpoints in configured (priority) order.
    pub fn all(&self) -> Vec<AgentEndpoint> {
        self.order
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    /// Agent names in configured (priority) order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Number of configured agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Record a health report from the external health-check collaborator.
    ///
    /// Sets the status, stamps the update time, and sets/clears the last
    /// error detail.
    pub fn update_health(
        &self,
        name: &str,
        health: AgentHealth,
        error: Option<String>,
    ) -> Result<(), RegistryError> {
        let mut endpoint = self
            .agents
            .get_mut(name)
            .ok_or_else(|| RegistryError::AgentNotFound(name.to_string()))?;

        endpoint.health = health;
        endpoint.last_health_update = Some(chrono::Utc::now());
        endpoint.last_error = error;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;

    fn test_registry() -> AgentRegistry {
        AgentRegistry::from_config(&AgentConfig::default_catalog()).unwrap()
    }

    #[test]
    fn test_registry_from_default_catalog() {
        let registry = test_registry();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains("document_agent"));
        assert!(registry.contains("general_agent"));
        assert!(!registry.contains("unknown_agent"));
    }

    #[test]
    fn test_registry_preserves_priority_order() {
        let registry = test_registry();
        let names: Vec<String> = registry.all().into_iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["document_agent", "employee_agent", "client_agent", "general_agent"]
        );
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut configs = AgentConfig::default_catalog();
        configs.push(configs[0].clone());

        let result = AgentRegistry::from_config(&configs);
        assert!(matches!(result, Err(RegistryError::DuplicateAgent(_))));
    }

    #[test]
    fn test_update_health() {
        let registry = test_registry();

        registry
            .update_health(
                "document_agent",
                AgentHealth::Unhealthy,
                Some("connection refused".to_string()),
            )
            .unwrap();

        let endpoint = registry.get("document_agent").unwrap();
        assert_eq!(endpoint.health, AgentHealth::Unhealthy);
        assert!(endpoint.last_health_update.is_some());
        assert_eq!(endpoint.last_error.as_deref(), Some("connection refused"));

        // Recovery clears the error detail
        registry
            .update_health("document_agent", AgentHealth::Healthy, None)
            .unwrap();
        let endpoint = registry.get("document_agent").unwrap();
        assert_eq!(endpoint.health, AgentHealth::Healthy);
        assert!(endpoint.last_error.is_none());
    }

    #[test]
    fn test_update_health_unknown_agent() {
        let registry = test_registry();
        let result = registry.update_health("ghost", AgentHealth::Healthy, None);
        assert!(matches!(result, Err(RegistryError::AgentNotFound(_))));
    }
}
