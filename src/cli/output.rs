//! Output formatting helpers for CLI commands

use crate::registry::{AgentEndpoint, AgentHealth};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// View model for agent display
#[derive(Debug, Clone, serde::Serialize)]
pub struct AgentView {
    pub name: String,
    pub url: String,
    pub tool_name: String,
    pub keywords: usize,
    pub timeout_ms: u64,
    pub retries: u32,
    pub health: AgentHealth,
}

impl From<&AgentEndpoint> for AgentView {
    fn from(endpoint: &AgentEndpoint) -> Self {
        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            tool_name: endpoint.tool_name.clone(),
            keywords: endpoint.keywords.len(),
            timeout_ms: endpoint.timeout_ms,
            retries: endpoint.retries,
            health: endpoint.health,
        }
    }
}

/// Format agents as a table
pub fn format_agents_table(agents: &[AgentView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name", "URL", "Tool", "Keywords", "Timeout", "Retries", "Health",
    ]);

    for agent in agents {
        let health_str = match agent.health {
            AgentHealth::Healthy => "Healthy".green().to_string(),
            AgentHealth::Unhealthy => "Unhealthy".red().to_string(),
            AgentHealth::Unknown => "Unknown".yellow().to_string(),
        };

        table.add_row(vec![
            Cell::new(&agent.name),
            Cell::new(&agent.url),
            Cell::new(&agent.tool_name),
            Cell::new(agent.keywords),
            Cell::new(format!("{}ms", agent.timeout_ms)),
            Cell::new(agent.retries),
            Cell::new(health_str),
        ]);
    }

    table.to_string()
}

/// Format agents as JSON
pub fn format_agents_json(agents: &[AgentView]) -> String {
    serde_json::to_string_pretty(&json!({
        "agents": agents
    }))
    .unwrap()
}
