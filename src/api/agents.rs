//! Agent catalog and health ingestion handlers.

use crate::api::types::ApiError;
use crate::api::AppState;
use crate::registry::{AgentHealth, RegistryError};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One agent in the catalog listing.
#[derive(Debug, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub url: String,
    pub description: String,
    pub tool_name: String,
    pub health: AgentHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_health_update: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Agent listing response.
#[derive(Debug, Serialize)]
pub struct AgentListResponse {
    pub agents: Vec<AgentSummary>,
}

/// Health report pushed by the external health-check collaborator.
#[derive(Debug, Deserialize)]
pub struct HealthReport {
    pub status: AgentHealth,
    #[serde(default)]
    pub detail: Option<String>,
}

/// GET /v1/agents - List the configured agents and their reported health.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<AgentListResponse> {
    let agents = state
        .router
        .registry()
        .all()
        .into_iter()
        .map(|endpoint| AgentSummary {
            name: endpoint.name,
            url: endpoint.url,
            description: endpoint.description,
            tool_name: endpoint.tool_name,
            health: endpoint.health,
            last_health_update: endpoint.last_health_update,
            last_error: endpoint.last_error,
        })
        .collect();

    Json(AgentListResponse { agents })
}

/// PUT /v1/agents/{name}/health - Ingest an external health report.
pub async fn update_health(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(report): Json<HealthReport>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .router
        .registry()
        .update_health(&name, report.status, report.detail)
        .map_err(|e| match e {
            RegistryError::AgentNotFound(agent) => {
                ApiError::agent_not_found(&agent, state.router.registry().names())
            }
            other => ApiError::bad_request(&other.to_string()),
        })?;

    Ok(Json(serde_json::json!({
        "agent": name,
        "status": report.status,
    })))
}
