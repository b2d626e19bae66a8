//! Switchboard - Intent dispatch router
//!
//! This library classifies chat messages, applies a sticky confidence
//! policy per session, and dispatches each message to the selected
//! specialist backend agent.

pub mod api;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod policy;
pub mod registry;
pub mod router;
pub mod session;
