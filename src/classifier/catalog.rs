//! Tool catalog offered to the primary classifier.
//!
//! One tool per downstream agent: a name, a natural-language description,
//! and a typed parameter schema. Tool names map 1:1 to agent names.

use crate::registry::AgentEndpoint;
use serde_json::{json, Value};
use std::collections::HashMap;

/// A single callable tool definition.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Fixed catalog of agent tools, built once from the configured endpoints.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
    /// tool name → agent name
    agent_by_tool: HashMap<String, String>,
}

impl ToolCatalog {
    pub fn from_endpoints(endpoints: &[AgentEndpoint]) -> Self {
        let mut tools = Vec::with_capacity(endpoints.len());
        let mut agent_by_tool = HashMap::with_capacity(endpoints.len());

        for endpoint in endpoints {
            tools.push(ToolDefinition {
                name: endpoint.tool_name.clone(),
                description: endpoint.description.clone(),
                parameters: endpoint.parameters.clone(),
            });
            agent_by_tool.insert(endpoint.tool_name.clone(), endpoint.name.clone());
        }

        Self {
            tools,
            agent_by_tool,
        }
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Resolve a selected tool name to its agent name.
    pub fn agent_for(&self, tool: &str) -> Option<&str> {
        self.agent_by_tool.get(tool).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Render the catalog in OpenAI chat-completions `tools` format.
    pub fn to_request_tools(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.parameters,
                    }
                })
            })
            .collect()
    }
}
