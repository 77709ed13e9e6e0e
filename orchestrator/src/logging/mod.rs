//! Logging module for the Scratchpad orchestrator
//!
//! Provides structured logging with tracing, supporting JSON output for production
//! and pretty printing for development.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Parse a log level name, falling back to INFO
pub fn parse_level(log_level: &str) -> Level {
    match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize the logging/tracing system
pub fn init_logging(log_level: &str, log_dir: Option<&Path>) -> Result<()> {
    let level = parse_level(log_level);

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("scratchpad_orchestrator={},tower_http={}", level, level))
    });

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("orchestrator.log"))
                .context("Failed to open log file")?;

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_writer(Mutex::new(log_file)),
            )
        }
        None => None,
    };

    // Pretty output on a terminal, JSON otherwise
    let stdout_layer = if is_terminal() {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
            .with_writer(std::io::stdout)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .with_writer(std::io::stdout)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Check if stdout is a terminal
fn is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
