//! Dependency installation through the package manager.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::ScaffoldError;
use crate::normalize::{DependencyMap, DependencySet};

/// Flag for runtime dependencies.
pub const SAVE_FLAG: &str = "--save";
/// Flag for development dependencies.
pub const SAVE_DEV_FLAG: &str = "--save-dev";

/// Runs `<command> install <flag> <names...>` inside a project directory.
#[derive(Debug, Clone)]
pub struct Installer {
    command: String,
    project_dir: PathBuf,
}

impl Installer {
    pub fn new(command: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            project_dir: project_dir.into(),
        }
    }

    /// Install runtime dependencies, then development dependencies.
    ///
    /// # Errors
    ///
    /// Stops at the first failed install; see [`Installer::install`].
    pub async fn install_all(&self, set: &DependencySet) -> Result<()> {
        self.install(&set.dependencies, SAVE_FLAG).await?;
        self.install(&set.dev_dependencies, SAVE_DEV_FLAG).await
    }

    /// Install the names in `dependencies` with `flag`. An empty map runs nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ExternalProcess`] (with the captured error
    /// stream) when the command is not found or exits unsuccessfully.
    pub async fn install(&self, dependencies: &DependencyMap, flag: &str) -> Result<()> {
        if dependencies.is_empty() {
            tracing::debug!("No packages for {}, skipping install", flag);
            return Ok(());
        }

        let mut args = vec!["install".to_string(), flag.to_string()];
        args.extend(dependencies.keys().cloned());
        let command_line = format!("{} {}", self.command, args.join(" "));

        let program = self.resolve_program()?;
        tracing::info!("Running {}", command_line);

        let output = Command::new(&program)
            .args(&args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to execute {command_line}"))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!(target: "installer", "{}", stdout.trim());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::debug!(target: "installer", "Exit status {}: {}", output.status, stderr.trim());
            return Err(ScaffoldError::ExternalProcess {
                command: command_line,
                stderr,
            }
            .into());
        }

        Ok(())
    }

    fn resolve_program(&self) -> Result<PathBuf, ScaffoldError> {
        which::which(&self.command).map_err(|e| ScaffoldError::ExternalProcess {
            command: self.command.clone(),
            stderr: format!("executable not found: {e}"),
        })
    }
}
