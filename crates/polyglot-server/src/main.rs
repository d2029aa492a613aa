//! Polyglot Server - Main Entry Point

use anyhow::{anyhow, Result};
use clap::Parser;
use polyglot_common::{init_logging, LoggingConfig};
use polyglot_config::ConfigLoader;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (YAML or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configuration
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level, overriding the configuration
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_logging(LoggingConfig {
        level: config.logging.level.clone(),
        json_format: config.logging.json,
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow!(e))?;

    info!("Starting Polyglot server v{}", env!("CARGO_PKG_VERSION"));
    polyglot_server::serve(config).await
}
