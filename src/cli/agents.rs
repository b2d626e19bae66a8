//! Agents command handlers

use crate::cli::output::{format_agents_json, format_agents_table, AgentView};
use crate::cli::AgentsListArgs;
use crate::config::SwitchboardConfig;
use crate::registry::AgentRegistry;

/// Handle `switchboard agents list` command
pub fn handle_agents_list(args: &AgentsListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        SwitchboardConfig::load(Some(&args.config))?
    } else {
        SwitchboardConfig::default()
    };

    let registry = AgentRegistry::from_config(&config.agents)?;
    let views: Vec<AgentView> = registry.all().iter().map(AgentView::from).collect();

    if args.json {
        println!("{}", format_agents_json(&views));
    } else {
        println!("{}", format_agents_table(&views));
    }

    Ok(())
}
