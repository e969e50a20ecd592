//! Headless tool host binary for stdin/stdout JSON communication.
//!
//! Reads `CommandEnvelope` messages as newline-delimited JSON from stdin,
//! dispatches `tools.call` requests to the search tools, and writes
//! `ResponseEnvelope` messages to stdout.
//!
//! All tracing output goes to stderr (or the configured log file) so that
//! stdout remains a clean JSON protocol channel.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use scout::config::{HostConfig, LoggingConfig};
use scout::host::stdio::run_stdio_bridge;
use scout::tools::build_registry;
use scout_search::EngineRegistry;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Search tool host speaking newline-delimited JSON over stdio.
#[derive(Parser)]
#[command(name = "scout-host", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = HostConfig::load(cli.config.as_deref()).context("failed to load config")?;
    config.apply_env_overrides();

    let _guard = init_logging(&config.logging)?;

    config.validate().context("invalid config")?;

    let engines = EngineRegistry::with_default_engines(&config.search.search_config());
    let tools = build_registry(&config, engines);
    tracing::info!(tools = ?tools.list(), "scout-host starting");

    run_stdio_bridge(tools).await.map_err(|e| {
        tracing::error!(error = %e, "scout-host exited with error");
        anyhow::anyhow!("scout-host failed: {e}")
    })?;

    tracing::info!("scout-host shut down cleanly");
    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
///
/// With a `log_file` configured, logs go to a daily-rotated file through a
/// non-blocking writer whose guard must live until exit.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_file) = &logging.log_file else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
        return Ok(None);
    };

    let (dir, file_name) = split_log_path(log_file)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(&dir, &file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    tracing::info!(log_file = %log_file.display(), "writing logs to file");

    Ok(Some(guard))
}

fn split_log_path(path: &Path) -> anyhow::Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("log_file has no file name: {}", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
