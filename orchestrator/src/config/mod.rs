//! Configuration module for the Scratchpad orchestrator
//!
//! Supports configuration via:
//! - YAML/TOML config files
//! - Environment variables (with SCRATCHPAD__ prefix)
//! - A `.env` file in the working directory

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::container::FileName;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for JSON log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Base directory holding one subdirectory per container
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Runtime used to execute container files, together with the seed program
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Execution settings
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Binds the interpreter that runs files to the program every new container is
/// seeded with. The two must always agree, so they are configured together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Interpreter binary, resolved through PATH
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed between the program and the file path
    #[serde(default)]
    pub args: Vec<String>,

    /// Name of the file seeded into each new container
    #[serde(default = "default_entry_file")]
    pub entry_file: String,

    /// Content of the seeded file
    #[serde(default = "default_entry_content")]
    pub entry_content: String,
}

/// Execution limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Wall-clock limit for a single execution in seconds. 0 disables the limit.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("containers")
}

fn default_program() -> String {
    "node".to_string()
}

fn default_entry_file() -> String {
    "index.js".to_string()
}

fn default_entry_content() -> String {
    r#"console.log("Hello, world!");"#.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            entry_file: default_entry_file(),
            entry_content: default_entry_content(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

impl ExecutionConfig {
    /// Timeout to hand to the executor, `None` when unlimited
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_dir: None,
            data_dir: default_data_dir(),
            runtime: RuntimeConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from config file if present
            .add_source(config::File::with_name("config/scratchpad").required(false))
            .add_source(config::File::with_name("/etc/scratchpad/config").required(false))
            // Override with environment variables (SCRATCHPAD__ prefix)
            .add_source(
                config::Environment::with_prefix("SCRATCHPAD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.runtime.program.trim().is_empty() {
            anyhow::bail!("Runtime program cannot be empty");
        }

        FileName::parse(&self.runtime.entry_file)
            .context("Runtime entry file must be a plain file name")?;

        Ok(())
    }
}
