use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shot_coach_cli::commands::Cli;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(fallback))
        )
        .with_writer(std::io::stderr)
        .init();

    cli.execute()
}
