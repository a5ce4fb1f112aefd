//! Driftnet CLI - Command-line interface
//!
//! Provides command-line access to the Driftnet stream aggregation
//! pipeline: search for movie or series streams and inspect the configured
//! provider table.

mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "driftnet")]
#[command(about = "Aggregated torrent stream search")]
struct Cli {
    /// Console log level
    #[arg(long, default_value_t = commands::LogLevel::Warn)]
    log_level: commands::LogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::init_tracing(cli.log_level);
    commands::handle_command(cli.command).await
}
