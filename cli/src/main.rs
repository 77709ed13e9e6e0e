//! Scratchpad CLI - Command-line interface for the Scratchpad orchestrator
//!
//! Provides a simple CLI for creating containers, editing their files and
//! running them

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

/// Scratchpad CLI - create containers, edit files, run them
#[derive(Parser)]
#[command(name = "scratchpad")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI for the Scratchpad orchestrator", long_about = None)]
struct Cli {
    /// Scratchpad API URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new container
    Create,

    /// List the files of a container
    Info {
        /// Container ID
        container: String,
    },

    /// Create an empty file in a container
    Touch {
        /// Container ID
        container: String,

        /// File name
        file: String,
    },

    /// Print a file from a container
    Cat {
        /// Container ID
        container: String,

        /// File name
        file: String,
    },

    /// Replace the content of a file
    Save {
        /// Container ID
        container: String,

        /// File name
        file: String,

        /// New content (or path to a local file with @ prefix)
        content: String,
    },

    /// Run a file in a container
    Run {
        /// Container ID
        container: String,

        /// File name
        file: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Get server health status
    Health,
}

#[derive(Debug, Serialize)]
struct CreateFileRequest<'a> {
    file_name: &'a str,
}

#[derive(Debug, Serialize)]
struct SaveFileRequest {
    content: String,
}

#[derive(Debug, Deserialize)]
struct CreatedContainer {
    container_id: String,
    folder_path: String,
}

#[derive(Debug, Deserialize)]
struct ContainerInfo {
    container_id: String,
    files: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FileContent {
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExecutionOutput {
    stdout: String,
    stderr: String,
    exit_code: Option<i32>,
    duration_ms: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(default)]
    details: Option<ExecutionOutput>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
    container_count: u64,
    runtime_version: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let api = cli.api_url.trim_end_matches('/');

    match cli.command {
        Commands::Create => {
            let response = client
                .post(format!("{}/api/v1/containers", api))
                .send()
                .context("Failed to send request")?;

            let created: CreatedContainer = check(response, "Create")?
                .json()
                .context("Failed to parse response")?;

            println!("{} {}", "✓ Created:".green(), created.container_id);
            println!("{} {}", "  Folder:".cyan(), created.folder_path);
        }

        Commands::Info { container } => {
            let response = client
                .get(format!("{}/api/v1/containers/{}/files", api, container))
                .send()
                .context("Failed to list files")?;

            let info: ContainerInfo = check(response, "List")?
                .json()
                .context("Failed to parse response")?;

            println!("{} {}", "Files in container".bright_cyan().bold(), info.container_id);
            for file in info.files {
                println!("  📄 {}", file);
            }
        }

        Commands::Touch { container, file } => {
            let response = client
                .post(format!("{}/api/v1/containers/{}/files", api, container))
                .json(&CreateFileRequest { file_name: &file })
                .send()
                .context("Failed to create file")?;

            check(response, "Create file")?;
            println!("{} {}", "✓ Created:".green(), file);
        }

        Commands::Cat { container, file } => {
            let response = client
                .get(format!("{}/api/v1/containers/{}/files/{}", api, container, file))
                .send()
                .context("Failed to read file")?;

            let file: FileContent = check(response, "Read")?
                .json()
                .context("Failed to parse response")?;

            print!("{}", file.content);
        }

        Commands::Save {
            container,
            file,
            content,
        } => {
            let content = read_content(content)?;
            let size = content.len();

            let response = client
                .put(format!("{}/api/v1/containers/{}/files/{}", api, container, file))
                .json(&SaveFileRequest { content })
                .send()
                .context("Failed to save file")?;

            check(response, "Save")?;
            println!("{} {} ({} bytes)", "✓ Saved:".green(), file, size);
        }

        Commands::Run {
            container,
            file,
            output,
        } => {
            let response = client
                .post(format!("{}/api/v1/containers/{}/files/{}/run", api, container, file))
                .send()
                .context("Failed to send request")?;

            let result = if response.status().is_success() {
                response.json::<ExecutionOutput>().context("Failed to parse response")?
            } else {
                let error: ErrorResponse = response
                    .json()
                    .context("Failed to parse error response")?;
                match error.details {
                    // The process ran but failed; show what it printed
                    Some(output) => output,
                    None => anyhow::bail!("Run failed: {} ({})", error.message, error.error),
                }
            };

            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_execution(&result);
            }
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", api))
                .send()
                .context("Failed to get health")?;

            let health: HealthResponse = check(response, "Health check")?
                .json()
                .context("Failed to parse response")?;

            println!("{}", "Scratchpad Orchestrator Status".bright_cyan().bold());
            println!("{}", "=".repeat(40).bright_blue());
            println!(
                "{} {}",
                "Status:".cyan(),
                if health.status == "healthy" {
                    health.status.green()
                } else {
                    health.status.yellow()
                }
            );
            println!("{} {}", "Version:".cyan(), health.version);
            println!("{} {}s", "Uptime:".cyan(), health.uptime_seconds);
            println!("{} {}", "Containers:".cyan(), health.container_count);
            println!(
                "{} {}",
                "Runtime:".cyan(),
                health.runtime_version.as_deref().unwrap_or("unavailable")
            );
        }
    }

    Ok(())
}

/// Turn a non-success response into an error carrying the server's message
fn check(response: Response, what: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(error) => anyhow::bail!("{} failed ({}): {}", what, status, error.message),
        Err(_) => anyhow::bail!("{} failed ({}): {}", what, status, text),
    }
}

/// Content is literal unless prefixed with @, which names a local file
fn read_content(content: String) -> Result<String> {
    match content.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path)),
        None => Ok(content),
    }
}

fn print_execution(result: &ExecutionOutput) {
    println!("{}", "=".repeat(60).bright_blue());
    let status = match result.exit_code {
        Some(0) => "success".green(),
        Some(code) => format!("exit {}", code).red(),
        None => "killed".red(),
    };
    println!("{} {}", "Status:".bright_cyan(), status);
    println!("{} {}ms", "Duration:".bright_cyan(), result.duration_ms);

    if !result.stdout.is_empty() {
        println!("\n{}", "STDOUT:".bright_green().bold());
        println!("{}", result.stdout);
    }

    if !result.stderr.is_empty() {
        println!("\n{}", "STDERR:".bright_red().bold());
        println!("{}", result.stderr);
    }

    println!("{}", "=".repeat(60).bright_blue());
}
