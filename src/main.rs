use anyhow::{Context, Result};
use clap::Parser;
use contenthub::{cli, config, workflow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

// The TUI owns stdout/stderr, so interactive sessions only log to a file.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if headless {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();
    let config = config::load(cli_args.config.as_deref())?;

    let log_file = cli_args.log_file.as_deref().or(config.log_file.as_deref());
    init_logging(log_file, cli_args.headless)?;

    // Delegate the main application logic to the workflow module
    workflow::run_contenthub(cli_args, config)
}
