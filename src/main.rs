//! Subtidal - Batch Subtitle Downloader
//!
//! This is the main entry point for the Subtidal application: it scans a
//! media folder for video files without subtitles, fetches the best match
//! from configured providers, and renames each downloaded subtitle to the
//! video's base name so media players pick it up.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subtidal::cli::Args;
use subtidal::config::Config;
use subtidal::language::Language;
use subtidal::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    // Command-line flags override config file values
    if args.min_size_mb.is_some() {
        config.scanner.min_size_mb = args.min_size_mb;
    }
    let language = Language::parse(&args.language)?;

    info!(
        "Fetching {} subtitles for videos under {}",
        language.code(),
        args.directory.display()
    );

    let workflow = Workflow::new(config, language)?;
    let summary = workflow.run(&args.directory).await?;

    println!();
    println!(">>> Finished!");
    println!(
        ">>> Fetched {} / {} subtitle files successfully.",
        summary.successful, summary.total
    );

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let subtidal_dir = std::env::current_dir()?.join(".subtidal");
    let log_dir = subtidal_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "subtidal.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Per-candidate failures only reach the console in verbose mode
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false); // No ANSI colors in file

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
