//! Structured logging module for request tracing
//!
//! Provides the tracing filter builder used at startup, per-request
//! correlation-id generation, and field helpers for opt-in message
//! content logging.

mod fields;

pub use fields::*;

use uuid::Uuid;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use switchboard::config::LoggingConfig;
/// use switchboard::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("router".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: switchboard::config::LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     enable_content_logging: false,
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,switchboard::router=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",switchboard::{}={}", component, level));
        }
    }

    filter_str
}

/// Generate a new request ID using UUID v4
///
/// Returns a unique correlation ID that can be used to track a message
/// through classification, dispatch, and retries.
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
