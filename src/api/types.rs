//! Request and response types for the routing API.

use crate::classifier::ClassificationSource;
use crate::dispatch::{DispatchError, DispatchErrorKind};
use crate::policy::RoutingDecision;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Routing request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteRequest {
    pub message: String,
    pub session_id: String,
    /// Optional conversational context forwarded to the primary classifier
    /// (e.g. `{"previous_messages": [...]}`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

/// Routing response: the decision plus the selected agent's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub request_id: String,
    pub selected_agent: String,
    pub confidence: f64,
    pub source: ClassificationSource,
    pub low_confidence: bool,
    pub switched: bool,
    pub extracted_parameters: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    pub agent_response: Value,
    pub timestamp: DateTime<Utc>,
}

/// API error response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Routing decision made before the failure, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<FailedRouting>,
}

/// What was attempted when a dispatch failed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FailedRouting {
    pub selected_agent: String,
    pub confidence: f64,
    pub source: ClassificationSource,
    pub attempts: u32,
    pub endpoint_was_unhealthy: bool,
}

impl ApiError {
    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "invalid_request_error".to_string(),
                code: Some("invalid_request_error".to_string()),
                routing: None,
            },
        }
    }

    /// Create an agent not found error (404).
    pub fn agent_not_found(agent: &str, available: &[String]) -> Self {
        let hint = if available.is_empty() {
            "No agents configured".to_string()
        } else {
            format!("Available: {}", available.join(", "))
        };
        Self {
            error: ApiErrorBody {
                message: format!("Agent '{}' not found. {}", agent, hint),
                r#type: "invalid_request_error".to_string(),
                code: Some("agent_not_found".to_string()),
                routing: None,
            },
        }
    }

    /// Create a low confidence rejection error (422).
    pub fn low_confidence(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "routing_error".to_string(),
                code: Some("low_confidence".to_string()),
                routing: None,
            },
        }
    }

    /// Create a dispatch failure error (502 or 504) carrying the decision
    /// that was attempted.
    pub fn dispatch_failed(decision: &RoutingDecision, error: &DispatchError) -> Self {
        let code = match error.kind {
            DispatchErrorKind::Timeout => "agent_timeout",
            DispatchErrorKind::Unreachable | DispatchErrorKind::Protocol => "agent_unavailable",
        };
        Self {
            error: ApiErrorBody {
                message: error.to_string(),
                r#type: "dispatch_error".to_string(),
                code: Some(code.to_string()),
                routing: Some(FailedRouting {
                    selected_agent: decision.selected_agent.clone(),
                    confidence: decision.confidence,
                    source: decision.source,
                    attempts: error.attempts,
                    endpoint_was_unhealthy: error.endpoint_was_unhealthy,
                }),
            },
        }
    }

    /// Create a gateway timeout error (504) for the outer request deadline.
    pub fn request_timeout() -> Self {
        Self {
            error: ApiErrorBody {
                message: "Routing request timed out".to_string(),
                r#type: "dispatch_error".to_string(),
                code: Some("request_timeout".to_string()),
                routing: None,
            },
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("agent_not_found") => StatusCode::NOT_FOUND,
            Some("low_confidence") => StatusCode::UNPROCESSABLE_ENTITY,
            Some("agent_unavailable") => StatusCode::BAD_GATEWAY,
            Some("agent_timeout") | Some("request_timeout") => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
