//! CLI command implementations

use clap::Subcommand;
use driftnet_core::config::DriftnetConfig;
use driftnet_core::types::{RankedStream, StreamOutput};
use driftnet_core::StreamAggregator;
use tracing_subscriber::EnvFilter;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search streams for a movie
    Movie {
        /// IMDB (`tt`-prefixed) or TMDB (numeric) identifier
        id: String,
        /// Emit the rendered stream objects as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search streams for one episode of a series
    Series {
        /// IMDB (`tt`-prefixed) or TMDB (numeric) identifier
        id: String,
        /// Season number
        #[arg(short, long)]
        season: u32,
        /// Episode number
        #[arg(short, long)]
        episode: u32,
        /// Emit the rendered stream objects as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured search providers
    Providers,
}

/// Console log levels for user control
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Informational, warning, and error messages
    Info,
    /// Debug, informational, warning, and error messages
    Debug,
    /// All messages including detailed tracing
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_directive())
    }
}

/// Initialize console tracing, respecting `RUST_LOG` when set.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handle the CLI command
///
/// # Errors
/// Returns an error when JSON serialization of the output fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = DriftnetConfig::from_env();

    match command {
        Commands::Movie { id, json } => {
            let aggregator = StreamAggregator::new(config);
            let streams = aggregator.movie_streams(&id).await;
            report_streams(&streams, json)
        }
        Commands::Series {
            id,
            season,
            episode,
            json,
        } => {
            let aggregator = StreamAggregator::new(config);
            let streams = aggregator.series_streams(&id, season, episode).await;
            report_streams(&streams, json)
        }
        Commands::Providers => {
            list_providers(&config);
            Ok(())
        }
    }
}

/// Print ranked streams as a table or as rendered JSON objects.
fn report_streams(streams: &[RankedStream], json: bool) -> anyhow::Result<()> {
    if json {
        let rendered: Vec<StreamOutput> = streams.iter().map(RankedStream::to_output).collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    if streams.is_empty() {
        println!("No streams found.");
        return Ok(());
    }

    for (index, stream) in streams.iter().enumerate() {
        println!("{:>3}. {}", index + 1, stream.display_name());
        println!("     {}", stream.stream.filename);
    }
    println!("\n{} streams total.", streams.len());

    Ok(())
}

/// Print the configured provider table.
fn list_providers(config: &DriftnetConfig) {
    println!("Configured providers");
    println!("{:-<60}", "");
    for source in &config.search.sources {
        println!("{:<14} {:<14} {}", source.key, source.display_name, source.url);
    }
}
