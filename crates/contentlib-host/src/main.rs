//! Contentlib host
//!
//! Loads a directory of content packages against in-memory game systems,
//! runs the startup sequence, and prints what each source contributed.

mod config;
mod lifecycle;
mod report;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use config::HostConfig;
use lifecycle::LifecycleDriver;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration directory
    #[arg(short, long, env = "CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment (development, production, etc.)
    #[arg(short, long, env = "ENVIRONMENT", default_value = "development")]
    environment: String,

    /// Directory scanned for packages
    #[arg(short, long)]
    packages: Option<PathBuf>,

    /// Package file extension
    #[arg(long)]
    extension: Option<String>,

    /// Number of item catalog rebuilds to simulate
    #[arg(long)]
    rebuilds: Option<u32>,

    /// Spawn every registered network prefab after loading
    #[arg(long)]
    developer_mode: bool,

    /// Log level
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Per-object log confirmations
    #[arg(long)]
    extended_logging: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = HostConfig::load_or_default(&args.config_dir, &args.environment);

    if let Some(root) = args.packages {
        config.packages.root = root;
    }
    if let Some(extension) = args.extension {
        config.packages.extension = extension;
    }
    if let Some(rebuilds) = args.rebuilds {
        config.lifecycle.catalog_rebuilds = rebuilds;
    }
    if args.developer_mode {
        config.host.developer_mode = true;
    }
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }
    if args.extended_logging {
        config.logging.extended = true;
    }

    let telemetry_config = telemetry::TelemetryConfig::new()
        .with_log_level(config.logging.level.clone())
        .with_extended(config.logging.extended)
        .with_json_format(config.logging.json_format)
        .with_timestamps(config.logging.include_timestamps)
        .with_thread_ids(config.logging.include_thread_ids)
        .with_target(config.logging.include_target);

    telemetry::init_with_config(telemetry_config);

    info!("Starting contentlib host");
    info!("Environment: {}", args.environment);
    info!("Packages: {} (*{})", config.packages.root.display(), config.packages.extension);

    let mut driver = LifecycleDriver::new(config);
    let report = driver.awake().context("Startup sequence already ran")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", report);
    }

    Ok(())
}
