//! Orbit - conversational travel booking CLI
//!
#![doc = "Orbit - conversational travel booking CLI"]
#![doc = "Main entry point for the Orbit application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orbit::cli::{Cli, Commands};
use orbit::commands;
use orbit::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Run { script, json } => {
            tracing::info!("Starting session script mode");
            commands::run::run_script(config, &script, json).await?;
            Ok(())
        }
        Commands::Catalog { json } => {
            commands::inspect::show_catalog(&config, json)?;
            Ok(())
        }
        Commands::Itinerary {
            alternate,
            day,
            json,
        } => {
            commands::inspect::show_itinerary(&config, alternate, day, json)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so chat and JSON output on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "orbit=debug" } else { "orbit=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
