//! Command-line interface for the service scaffold generator.
//!
//! # Available Commands
//!
//! - `init` - generate a project from an answers file
//! - `render` - render one template to stdout
//! - `normalize` - print the normalized config tree, dependency sets or manifest
//!
//! # Global Options
//!
//! - `--verbose` - enable debug output
//! - `--quiet` - suppress everything except errors
//! - `--config` - path to a generator config file (default `~/.scaffold/config.toml`)
//!
//! Log output goes to stderr so that `render` and `normalize` output can be piped.
//!
//! # Example
//!
//! ```bash
//! # Generate a project without touching the network or npm
//! scaffold init --answers answers.json --path ./my-service --no-license --skip-install
//!
//! # Inspect the config tree as it will be written
//! scaffold normalize --answers answers.json --part config --relaxed
//!
//! # Try a template override
//! scaffold render router --data router.json --templates ./my-templates
//! ```

mod init;
mod normalize;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GeneratorConfig;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `RUST_LOG` takes precedence when set.
    pub log_level: Option<String>,

    /// Explicit generator config file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => EnvFilter::new(self.log_level.as_deref().unwrap_or("error")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Generate Node.js service projects from answer files.
#[derive(Parser)]
#[command(
    name = "scaffold",
    about = "Generate a service project from normalized answers and templates",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the generator config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a project from an answers file
    Init(init::InitCommand),

    /// Render a single template to stdout
    Render(render::RenderCommand),

    /// Print normalized answers
    Normalize(normalize::NormalizeCommand),
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit [`CliConfig`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let generator = GeneratorConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Commands::Init(cmd) => cmd.execute(&generator, self.quiet).await,
            Commands::Render(cmd) => cmd.execute(&generator).await,
            Commands::Normalize(cmd) => cmd.execute(&generator).await,
        }
    }
}
