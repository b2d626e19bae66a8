use clap::Parser;
use switchboard::cli::{
    agents, handle_completions, handle_config_init, AgentsCommands, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => switchboard::cli::serve::run_serve(args).await,
        Commands::Agents(cmd) => match cmd {
            AgentsCommands::List(args) => agents::handle_agents_list(&args),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
