//! Downstream agent configuration

use serde::{Deserialize, Serialize};
use serde_json::json;

fn default_keyword_weight() -> f64 {
    0.2
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retries() -> u32 {
    1
}

/// A weighted keyword used by the fallback classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    #[serde(default = "default_keyword_weight")]
    pub weight: f64,
}

impl Keyword {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_string(),
            weight: default_keyword_weight(),
        }
    }
}

/// Configuration for one downstream agent.
///
/// The order of `[[agents]]` entries in the config file is the fixed
/// priority order used for tie-breaking, and the scan order of the
/// keyword classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent name, unique across the configured set (e.g., "document_agent")
    pub name: String,
    /// Full invoke URL (e.g., "http://localhost:8002/search")
    pub url: String,
    /// Natural-language description offered to the primary classifier
    pub description: String,
    /// Tool name exposed in the classifier catalog; defaults to the agent name
    #[serde(default)]
    pub tool_name: Option<String>,
    /// Weighted keywords for the fallback classifier
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    /// JSON schema for the tool's parameters
    #[serde(default = "AgentConfig::default_parameters")]
    pub parameters: serde_json::Value,
    /// Per-attempt dispatch timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retries after the first failed attempt (no backoff)
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl AgentConfig {
    fn default_parameters() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "message": { "type": "string", "description": "The user message" }
            },
            "required": ["message"]
        })
    }

    /// Tool name as seen by the primary classifier.
    pub fn tool(&self) -> &str {
        self.tool_name.as_deref().unwrap_or(&self.name)
    }

    /// Default four-agent catalog: document search, employee analytics,
    /// client analytics, and general conversation.
    pub fn default_catalog() -> Vec<AgentConfig> {
        vec![
            AgentConfig {
                name: "document_agent".to_string(),
                url: "http://localhost:8002/search".to_string(),
                description: "Searches internal documents, company policies, regulations, \
                              the code of ethics, and benefits material. Use for any \
                              document or policy lookup."
                    .to_string(),
                tool_name: Some("search_documents".to_string()),
                keywords: ["document", "policy", "regulation", "ethics", "code of conduct", "benefits"]
                    .iter()
                    .map(|w| Keyword::new(w))
                    .collect(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search keywords or question" },
                        "top_k": { "type": "integer", "description": "Number of results", "default": 5 },
                        "filters": { "type": "object", "description": "Search filters (document type etc.)" }
                    },
                    "required": ["query"]
                }),
                timeout_ms: default_timeout_ms(),
                retries: default_retries(),
            },
            AgentConfig {
                name: "employee_agent".to_string(),
                url: "http://localhost:8003/analyze".to_string(),
                description: "Analyzes employee records: performance, attendance, \
                              department statistics, and HR data."
                    .to_string(),
                tool_name: Some("analyze_employee_data".to_string()),
                keywords: ["employee", "staff", "performance", "attendance", "department", "headcount"]
                    .iter()
                    .map(|w| Keyword::new(w))
                    .collect(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "employee_id": { "type": "string", "description": "Specific employee id (optional)" },
                        "analysis_type": {
                            "type": "string",
                            "enum": ["general", "performance", "attendance", "department"],
                            "description": "Kind of analysis to run"
                        },
                        "filters": { "type": "object", "description": "Analysis filters (department, period)" }
                    },
                    "required": ["analysis_type"]
                }),
                timeout_ms: default_timeout_ms(),
                retries: default_retries(),
            },
            AgentConfig {
                name: "client_agent".to_string(),
                url: "http://localhost:8004/info".to_string(),
                description: "Looks up client accounts: transactions, contracts, \
                              revenue analytics, and business relationships."
                    .to_string(),
                tool_name: Some("get_client_information".to_string()),
                keywords: ["client", "customer", "account", "contract", "revenue", "sales"]
                    .iter()
                    .map(|w| Keyword::new(w))
                    .collect(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "client_id": { "type": "string", "description": "Specific client id (optional)" },
                        "info_type": {
                            "type": "string",
                            "enum": ["basic", "transactions", "contracts", "analytics"],
                            "description": "Kind of information requested"
                        },
                        "filters": { "type": "object", "description": "Lookup filters (period, transaction type)" }
                    },
                    "required": ["info_type"]
                }),
                timeout_ms: default_timeout_ms(),
                retries: default_retries(),
            },
            AgentConfig {
                name: "general_agent".to_string(),
                url: "http://localhost:8005/chat".to_string(),
                description: "Handles greetings, small talk, company introductions, and \
                              any conversation that does not fit the specialist agents."
                    .to_string(),
                tool_name: Some("general_conversation".to_string()),
                keywords: vec![],
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "message": { "type": "string", "description": "The user message" }
                    },
                    "required": ["message"]
                }),
                timeout_ms: default_timeout_ms(),
                retries: default_retries(),
            },
        ]
    }
}
