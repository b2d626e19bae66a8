//! HTTP surface of the router.
//!
//! ## Endpoints
//!
//! - `POST /v1/route` - Classify a message and dispatch it to an agent
//! - `GET /v1/agents` - List configured agents with reported health
//! - `PUT /v1/agents/{name}/health` - Ingest an external health report
//! - `GET /health` - Router health rollup
//!
//! ## Example
//!
//! ```no_run
//! use switchboard::api::{create_router, AppState};
//! use switchboard::config::SwitchboardConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(SwitchboardConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod agents;
mod health;
mod route;
pub mod types;

pub use types::*;

use crate::classifier::{ClassificationPipeline, KeywordClassifier, ToolCallClassifier};
use crate::config::SwitchboardConfig;
use crate::dispatch::Dispatcher;
use crate::registry::{AgentRegistry, RegistryError};
use crate::router::Router as IntentRouter;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Maximum request body size (1 MB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<SwitchboardConfig>,
    pub router: Arc<IntentRouter>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build the full routing stack from configuration.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the agent catalog is invalid (duplicate
    /// names); a validated config never trips this.
    pub fn new(config: Arc<SwitchboardConfig>) -> Result<Self, RegistryError> {
        let registry = Arc::new(AgentRegistry::from_config(&config.agents)?);

        let client = Arc::new(
            reqwest::Client::builder()
                .pool_max_idle_per_host(10)
                .build()
                .expect("Failed to create HTTP client"),
        );

        let primary = if config.classifier.enabled {
            let api_key = config.classifier.api_key();
            if api_key.is_none() {
                if let Some(var) = &config.classifier.api_key_env {
                    warn!(
                        env_var = %var,
                        "Classifier API key variable not set, calls may be rejected"
                    );
                }
            }
            Some(Arc::new(ToolCallClassifier::new(
                client.clone(),
                config.classifier.url.clone(),
                config.classifier.model.clone(),
                api_key,
                Duration::from_millis(config.classifier.timeout_ms),
                config.classifier.temperature,
                &registry.all(),
            )) as Arc<dyn crate::classifier::IntentClassifier>)
        } else {
            None
        };

        let fallback = KeywordClassifier::new(&registry.all(), &config.policy);
        let pipeline = ClassificationPipeline::new(primary, fallback, registry.names().to_vec());
        let dispatcher = Dispatcher::new(registry.clone(), client);
        let router = Arc::new(IntentRouter::new(
            registry,
            pipeline,
            dispatcher,
            config.policy.clone(),
        ));

        Ok(Self {
            config,
            router,
            start_time: Instant::now(),
        })
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/route", post(route::handle))
        .route("/v1/agents", get(agents::list))
        .route("/v1/agents/:name/health", put(agents::update_health))
        .route("/health", get(health::handle))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
