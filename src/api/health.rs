//! Health check endpoint handler.

use crate::api::AppState;
use crate::registry::AgentHealth;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub agents: AgentCounts,
    pub active_sessions: usize,
}

/// Agent health counts, from the externally reported statuses.
#[derive(Debug, Serialize)]
pub struct AgentCounts {
    pub total: usize,
    pub healthy: usize,
    pub unhealthy: usize,
    pub unknown: usize,
}

/// GET /health - Return router health status.
///
/// The rollup reflects reported agent health only; agents with no report
/// yet count as unknown and do not degrade the status.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let endpoints = state.router.registry().all();
    let healthy = endpoints
        .iter()
        .filter(|e| e.health == AgentHealth::Healthy)
        .count();
    let unhealthy = endpoints
        .iter()
        .filter(|e| e.health == AgentHealth::Unhealthy)
        .count();
    let unknown = endpoints.len() - healthy - unhealthy;

    let status = if unhealthy == 0 {
        "healthy"
    } else if unhealthy < endpoints.len() {
        "degraded"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        agents: AgentCounts {
            total: endpoints.len(),
            healthy,
            unhealthy,
            unknown,
        },
        active_sessions: state.router.session_count(),
    })
}
