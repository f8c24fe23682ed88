//! Shared helpers for integration tests.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Temporary workspace with an answers file, an isolated generator config and
/// a project output directory.
pub struct TestProject {
    _temp: TempDir,
    root: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let root = temp.path().to_path_buf();
        Ok(Self {
            _temp: temp,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the generated project is written to.
    pub fn project_dir(&self) -> PathBuf {
        self.root.join("project")
    }

    /// Generator config path; absent until [`TestProject::write_config`] is called.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn write_answers(&self, answers: &Value) -> Result<PathBuf> {
        self.write_json("answers.json", answers)
    }

    pub fn write_json(&self, name: &str, value: &Value) -> Result<PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
        Ok(path)
    }

    pub fn write_config(&self, toml: &str) -> Result<PathBuf> {
        let path = self.config_path();
        std::fs::write(&path, toml)?;
        Ok(path)
    }

    pub fn read_project_file(&self, relative: &str) -> Result<String> {
        let path = self.project_dir().join(relative);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Run the `scaffold` binary with the config isolated to this workspace.
    pub fn run_scaffold(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_scaffold"))
            .args(args)
            .current_dir(&self.root)
            .env("SCAFFOLD_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run scaffold command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    /// Write an executable shell script standing in for the package manager.
    ///
    /// Every invocation appends its arguments as one line to `npm.log`.
    #[cfg(unix)]
    pub fn fake_npm(&self, exit_code: i32, stderr: &str) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let log = self.npm_log_path();
        let script = self.root.join("fake-npm");
        let body = format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\necho '{}' >&2\nexit {}\n",
            log.display(),
            stderr,
            exit_code
        );
        std::fs::write(&script, body)?;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
        Ok(script)
    }

    pub fn npm_log_path(&self) -> PathBuf {
        self.root.join("npm.log")
    }

    pub fn npm_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.npm_log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        self
    }
}

/// One-shot HTTP server answering a single request with `status` and `body`.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(status: u16, body: String) -> Result<(String, JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return String::new();
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).to_string()
    });

    Ok((base_url, handle))
}
