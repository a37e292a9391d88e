use clap::Parser;
use tracing_subscriber::EnvFilter;

use honey::cli::handlers;
use honey::cli::{Cli, Commands};
use honey::{Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stderr keeps the chat output on stdout readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("honey=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, open } => handlers::serve(config, port, open).await,
        Commands::Chat { server, quiet } => handlers::chat(config, server, quiet).await,
        Commands::Tasks { command } => handlers::tasks(config, command),
        Commands::Plan => handlers::plan(config),
    }
}
