//! Primary tool-calling classifier.
//!
//! Issues one chat-completions call against an OpenAI-compatible service,
//! offering the fixed agent tool catalog and asking the model to select
//! exactly one tool. Any failure mode (network, timeout, upstream error, no
//! selection, unknown tool, malformed arguments) is a typed
//! [`ClassifierError`] that the pipeline translates into a fallback
//! invocation; nothing here reaches the caller directly.

use super::catalog::ToolCatalog;
use super::{ClassifierError, IntentCandidate, IntentClassifier};
use crate::registry::AgentEndpoint;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Confidence assigned when the model selects a tool with no corroborating
/// keywords in the message.
const BASE_CONFIDENCE: f64 = 0.9;
/// Added per keyword of the selected agent found in the message.
const KEYWORD_BONUS: f64 = 0.05;
const MAX_CONFIDENCE: f64 = 0.99;

/// Primary classifier backed by an LLM tool-calling service.
pub struct ToolCallClassifier {
    client: Arc<Client>,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    temperature: f32,
    catalog: ToolCatalog,
    system_prompt: String,
    /// agent name → lower-cased keywords, for the confidence heuristic
    keywords: HashMap<String, Vec<String>>,
}

/// Subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    /// JSON-encoded argument object
    arguments: String,
}

impl ToolCallClassifier {
    pub fn new(
        client: Arc<Client>,
        base_url: String,
        model: String,
        api_key: Option<String>,
        timeout: Duration,
        temperature: f32,
        endpoints: &[AgentEndpoint],
    ) -> Self {
        let catalog = ToolCatalog::from_endpoints(endpoints);
        let system_prompt = Self::build_system_prompt(endpoints);
        let keywords = endpoints
            .iter()
            .map(|endpoint| {
                (
                    endpoint.name.clone(),
                    endpoint
                        .keywords
                        .iter()
                        .map(|k| k.word.to_lowercase())
                        .collect(),
                )
            })
            .collect();

        Self {
            client,
            base_url,
            model,
            api_key,
            timeout,
            temperature,
            catalog,
            system_prompt,
            keywords,
        }
    }

    /// One instruction block listing every agent and its role.
    fn build_system_prompt(endpoints: &[AgentEndpoint]) -> String {
        let mut prompt = String::from(
            "You are the intent router for a multi-agent assistant. Analyze the \
             user's message and route it to the most appropriate specialist agent \
             by calling exactly one of the available functions with suitable \
             arguments.\n\nAgents:\n",
        );
        for endpoint in endpoints {
            prompt.push_str(&format!(
                "- {} ({}): {}\n",
                endpoint.name, endpoint.tool_name, endpoint.description
            ));
        }
        prompt
    }

    /// Confidence heuristic: high base plus a small bonus per matched
    /// keyword of the selected agent, capped below 1.0.
    fn confidence_for(&self, message: &str, agent: &str) -> f64 {
        let lowered = message.to_lowercase();
        let matches = self
            .keywords
            .get(agent)
            .map(|words| words.iter().filter(|w| lowered.contains(w.as_str())).count())
            .unwrap_or(0);

        (BASE_CONFIDENCE + matches as f64 * KEYWORD_BONUS).min(MAX_CONFIDENCE)
    }

    fn build_messages(&self, message: &str, context: Option<&Value>) -> Vec<Value> {
        let mut messages = vec![json!({
            "role": "system",
            "content": self.system_prompt,
        })];

        // Prior turns, when the caller supplies them
        if let Some(previous) = context
            .and_then(|c| c.get("previous_messages"))
            .and_then(|p| p.as_array())
        {
            messages.extend(previous.iter().cloned());
        }

        messages.push(json!({
            "role": "user",
            "content": message,
        }));
        messages
    }
}

#[async_trait]
impl IntentClassifier for ToolCallClassifier {
    fn name(&self) -> &'static str {
        "tool_call"
    }

    async fn classify(
        &self,
        message: &str,
        context: Option<&Value>,
    ) -> Result<IntentCandidate, ClassifierError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": self.build_messages(message, context),
            "tools": self.catalog.to_request_tools(),
            "tool_choice": "auto",
            "temperature": self.temperature,
        });

        let mut request = self.client.post(&url).json(&body).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout.as_millis() as u64)
            } else {
                ClassifierError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClassifierError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            ClassifierError::InvalidResponse(format!("Failed to parse completion: {}", e))
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::InvalidResponse("empty choices".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default();
        let call = tool_calls.into_iter().next().ok_or(ClassifierError::NoSelection)?;

        let agent = self
            .catalog
            .agent_for(&call.function.name)
            .ok_or_else(|| ClassifierError::UnknownTool(call.function.name.clone()))?
            .to_string();

        let parameters: Map<String, Value> = serde_json::from_str(&call.function.arguments)
            .map_err(|e| ClassifierError::MalformedArguments {
                tool: call.function.name.clone(),
                detail: e.to_string(),
            })?;

        Ok(IntentCandidate {
            confidence: self.confidence_for(message, &agent),
            agent,
            parameters,
            rationale: choice.message.content,
        })
    }
}
