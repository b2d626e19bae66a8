//! Routing endpoint handler.

use crate::api::types::{ApiError, RouteRequest, RouteResponse};
use crate::api::AppState;
use crate::logging::{generate_request_id, message_preview};
use crate::router::RouterError;
use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, field, info_span, Instrument};

/// POST /v1/route - Classify a message and dispatch it to an agent.
///
/// The whole turn runs under the server-wide request deadline; a turn that
/// exceeds it answers 504 even if classification already succeeded.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let request_id = generate_request_id();
    let span = info_span!("route", request_id = %request_id, message = field::Empty);
    // Message content only enters the span when content logging is opted in
    if let Some(preview) = message_preview(
        &request.message,
        state.config.logging.enable_content_logging,
    ) {
        span.record("message", field::display(&preview));
    }

    let deadline = Duration::from_secs(state.config.server.request_timeout_seconds);
    let outcome = tokio::time::timeout(
        deadline,
        state
            .router
            .classify_and_route(&request.message, &request.session_id, request.context.as_ref()),
    )
    .instrument(span)
    .await;

    match outcome {
        Err(_) => {
            error!(request_id = %request_id, "Routing request exceeded deadline");
            Err(ApiError::request_timeout())
        }
        Ok(Err(RouterError::InvalidSession(reason))) => Err(ApiError::bad_request(&reason)),
        Ok(Err(RouterError::Policy(e))) => Err(ApiError::low_confidence(&e.to_string())),
        Ok(Err(RouterError::Dispatch { decision, source })) => {
            error!(
                request_id = %request_id,
                agent = %source.agent,
                kind = %source.kind,
                attempts = source.attempts,
                "Dispatch failed"
            );
            Err(ApiError::dispatch_failed(&decision, &source))
        }
        Ok(Ok(outcome)) => Ok(Json(RouteResponse {
            request_id,
            selected_agent: outcome.decision.selected_agent,
            confidence: outcome.decision.confidence,
            source: outcome.decision.source,
            low_confidence: outcome.decision.low_confidence,
            switched: outcome.decision.switched,
            extracted_parameters: outcome.parameters,
            rationale: outcome.rationale,
            agent_response: outcome.reply.payload,
            timestamp: outcome.decision.timestamp,
        })),
    }
}
