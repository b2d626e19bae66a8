//! CLI module for Switchboard
//!
//! Command-line interface definitions and handlers for the intent dispatch
//! router.
//!
//! # Commands
//!
//! - `serve` - Start the Switchboard server
//! - `agents` - Inspect the configured agent catalog
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! switchboard serve
//!
//! # List configured agents as JSON
//! switchboard agents list --json
//!
//! # Generate shell completions
//! switchboard completions bash > ~/.bash_completion.d/switchboard
//! ```

pub mod agents;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Switchboard - Intent Dispatch Router
#[derive(Parser, Debug)]
#[command(
    name = "switchboard",
    version,
    about = "Routes chat messages to specialist backend agents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Switchboard server
    Serve(ServeArgs),
    /// Inspect configured agents
    #[command(subcommand)]
    Agents(AgentsCommands),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "switchboard.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "SWITCHBOARD_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "SWITCHBOARD_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SWITCHBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable the primary classifier (keyword fallback only)
    #[arg(long)]
    pub no_classifier: bool,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommands {
    /// List configured agents
    List(AgentsListArgs),
}

#[derive(Args, Debug)]
pub struct AgentsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "switchboard.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "switchboard.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
