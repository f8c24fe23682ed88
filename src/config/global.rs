//! Generator configuration file.
//!
//! The generator reads optional user settings from a TOML file:
//!
//! - **Unix/macOS**: `~/.scaffold/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\scaffold\config.toml`
//! - **Override**: `--config <path>` or the `SCAFFOLD_CONFIG` environment variable
//!
//! A missing file yields [`GeneratorConfig::default`].
//!
//! # Example
//!
//! ```toml
//! template_dir = "/home/me/scaffold-templates"
//! npm_command = "pnpm"
//! node_engine = ">=20.0.0"
//! skip_install = false
//!
//! [baseline_dependencies]
//! bi-service = "^1.0.0"
//! bluebird = "*"
//! lodash = "*"
//!
//! [plugins]
//! my-internal-plugin = { dev = false }
//! eslint = { dev = true }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::normalize::dependencies::{self, DependencyMap, PluginRegistry};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "SCAFFOLD_CONFIG";

/// Default GitHub API base URL for license lookups.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

fn default_npm_command() -> String {
    if cfg!(windows) {
        "npm.cmd".to_string()
    } else {
        "npm".to_string()
    }
}

fn default_github_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_node_engine() -> String {
    ">=18.0.0".to_string()
}

/// User settings for the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Directory with `<name>.tera` files that override the built-in templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Package installer executable.
    #[serde(default = "default_npm_command")]
    pub npm_command: String,

    /// GitHub API base URL used to fetch license texts.
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// Do not run the installer after writing files.
    #[serde(default)]
    pub skip_install: bool,

    /// `engines.node` constraint written to `package.json`.
    #[serde(default = "default_node_engine")]
    pub node_engine: String,

    /// Runtime dependencies every project starts with. Replaces the built-in set when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_dependencies: Option<DependencyMap>,

    /// Plugin registry entries added to (or overriding) the built-in registry.
    #[serde(default, skip_serializing_if = "PluginRegistry::is_empty")]
    pub plugins: PluginRegistry,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            npm_command: default_npm_command(),
            github_api_url: default_github_api_url(),
            skip_install: false,
            node_engine: default_node_engine(),
            baseline_dependencies: None,
            plugins: PluginRegistry::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from `path`, else `$SCAFFOLD_CONFIG`, else the default location.
    ///
    /// A missing file is not an error and yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(path) => PathBuf::from(path),
                None => match Self::default_path() {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::debug!("No default config location: {}", e);
                        return Ok(Self::default());
                    }
                },
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No generator config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read generator config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse generator config from {}", path.display()))
    }

    /// Write configuration as TOML, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize generator config")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write generator config to {}", path.display()))
    }

    /// Platform default config file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("scaffold")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".scaffold")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Built-in registry with the configured plugins layered on top.
    pub fn plugin_registry(&self) -> PluginRegistry {
        let mut registry = dependencies::default_registry();
        registry.extend(self.plugins.iter().map(|(name, spec)| (name.clone(), *spec)));
        registry
    }

    /// Baseline runtime dependencies.
    pub fn baseline(&self) -> DependencyMap {
        self.baseline_dependencies.clone().unwrap_or_else(dependencies::default_baseline)
    }

    /// Baseline `package.json` fields that answers are merged over.
    pub fn manifest_defaults(&self) -> Map<String, Value> {
        let defaults = json!({
            "scripts": {
                "start": "./node_modules/.bin/bi-service run",
            },
            "private": true,
            "main": "index.js",
            "files": [
                "CHANGELOG.md",
                "README.md",
                "LICENSE",
                "index.js",
                "lib",
                "bin",
            ],
            "engines": {
                "node": self.node_engine,
            },
            "contributors": [],
            "dependencies": {},
            "devDependencies": {},
            "peerDependencies": {},
        });

        match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
