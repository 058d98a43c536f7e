//! Taxon CLI - classify a directory of images with a vision model.
//!
//! Each image is stretched to 300×300, sent to a chat-completions model with
//! a fixed taxonomy, and the raw response is saved beside it as
//! `<image>.json`.
//!
//! # Usage
//!
//! ```bash
//! # Classify the first image under ./source
//! taxon classify
//!
//! # Classify every image in a directory
//! taxon classify ./photos --all
//!
//! # View configuration
//! taxon config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Taxon - single-label image classification with JSON sidecars.
#[derive(Parser, Debug)]
#[command(name = "taxon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify images and write a JSON sidecar next to each one
    Classify(cli::classify::ClassifyArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Pick up OPENAI_KEY and friends from a local .env before config resolution.
    let dotenv_path = dotenv::dotenv().ok();

    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match taxon_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `taxon config path`."
            );
            taxon_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Taxon v{}", taxon_core::VERSION);
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    match cli.command {
        Commands::Classify(args) => cli::classify::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
