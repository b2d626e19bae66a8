//! Agent dispatch.
//!
//! Delivers a routed message to its agent endpoint over HTTP with a
//! per-attempt timeout and a bounded retry budget. Retries cover transport
//! failures only; an agent that answers, even with an error status, has
//! spoken and its answer is final for this turn. Endpoint health is
//! advisory: an unhealthy endpoint is still called, the stale status just
//! travels with any resulting failure.

mod error;

pub use error::{DispatchError, DispatchErrorKind};

use crate::classifier::ClassificationSource;
use crate::registry::{AgentHealth, AgentRegistry};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Routing metadata attached to every agent reply.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RoutingMeta {
    pub selected_agent: String,
    pub confidence: f64,
    pub source: ClassificationSource,
}

/// A successful agent reply plus how it was routed.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub payload: Value,
    pub status: u16,
    pub routing: RoutingMeta,
}

/// Delivers messages to agent endpoints.
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
    client: Arc<reqwest::Client>,
}

impl Dispatcher {
    pub fn new(registry: Arc<AgentRegistry>, client: Arc<reqwest::Client>) -> Self {
        Self { registry, client }
    }

    /// Dispatch a message to the named agent.
    ///
    /// Makes at most `1 + retries` attempts, each bounded by the endpoint's
    /// per-attempt timeout. Only timeouts and connection failures are
    /// retried.
    pub async fn dispatch(
        &self,
        routing: RoutingMeta,
        message: &str,
        session_id: &str,
        parameters: &Map<String, Value>,
    ) -> Result<AgentReply, DispatchError> {
        let endpoint = self.registry.get(&routing.selected_agent).ok_or_else(|| {
            DispatchError {
                agent: routing.selected_agent.clone(),
                kind: DispatchErrorKind::Protocol,
                attempts: 0,
                endpoint_was_unhealthy: false,
                detail: "agent not found in registry".to_string(),
            }
        })?;

        let was_unhealthy = endpoint.health == AgentHealth::Unhealthy;
        if was_unhealthy {
            warn!(
                agent = %endpoint.name,
                "Dispatching to endpoint marked unhealthy"
            );
        }

        let body = json!({
            "message": message,
            "session_id": session_id,
            "parameters": parameters,
        });

        let max_attempts = 1 + endpoint.retries;
        let mut last_failure: Option<(DispatchErrorKind, String)> = None;

        for attempt in 1..=max_attempts {
            debug!(
                agent = %endpoint.name,
                attempt,
                max_attempts,
                "Dispatching message"
            );

            let result = self
                .client
                .post(&endpoint.url)
                .json(&body)
                .timeout(endpoint.timeout())
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        // The agent answered; error statuses are not retried
                        let detail = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(DispatchError {
                            agent: endpoint.name.clone(),
                            kind: DispatchErrorKind::Protocol,
                            attempts: attempt,
                            endpoint_was_unhealthy: was_unhealthy,
                            detail: format!("HTTP {}: {}", status.as_u16(), detail),
                        });
                    }

                    let payload: Value = response.json().await.map_err(|e| DispatchError {
                        agent: endpoint.name.clone(),
                        kind: DispatchErrorKind::Protocol,
                        attempts: attempt,
                        endpoint_was_unhealthy: was_unhealthy,
                        detail: format!("Invalid response body: {}", e),
                    })?;

                    return Ok(AgentReply {
                        payload,
                        status: status.as_u16(),
                        routing,
                    });
                }
                Err(e) => {
                    let kind = if e.is_timeout() {
                        DispatchErrorKind::Timeout
                    } else {
                        DispatchErrorKind::Unreachable
                    };
                    warn!(
                        agent = %endpoint.name,
                        attempt,
                        kind = %kind,
                        error = %e,
                        "Dispatch attempt failed"
                    );
                    last_failure = Some((kind, e.to_string()));
                }
            }
        }

        let (kind, detail) = last_failure
            .unwrap_or((DispatchErrorKind::Unreachable, "no attempts made".to_string()));
        Err(DispatchError {
            agent: endpoint.name.clone(),
            kind,
            attempts: max_attempts,
            endpoint_was_unhealthy: was_unhealthy,
            detail,
        })
    }
}
