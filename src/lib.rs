//! Service scaffold generator.
//!
//! Turns a set of collected answers into a ready-to-run Node.js service
//! project: `package.json`, a JSON5 configuration file, boilerplate sources,
//! license text and installed dependencies.
//!
//! # Architecture Overview
//!
//! ```text
//! answers ─┬─> normalize::config        ─> ConfigTree ($ref / $join directives)
//!          ├─> normalize::dependencies  ─> DependencySet
//!          └─> normalize::package       ─> Manifest
//!                          │
//!                          v
//!               templating::TemplateRenderer (one call per output file)
//!                          │
//!                          v
//!               scaffold::write_plan, scaffold::Installer
//! ```
//!
//! Normalization and rendering are pure and synchronous. Everything that
//! touches the outside world (files, the license service, the package
//! installer) lives in [`scaffold`].
//!
//! # Core Modules
//!
//! - [`answers`] - the raw answer set and its internal (`_`-prefixed) fields
//! - [`directive`] - `$ref` / `$join` config directives
//! - [`normalize`] - answer normalizers
//! - [`templating`] - template stores, render context and serializers
//! - [`scaffold`] - project plan, file writer, license client, installer
//! - [`config`] - generator settings (`~/.scaffold/config.toml`)
//! - [`core`] - error types and user-facing error formatting
//! - [`cli`] - command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use service_scaffold::answers::AnswerSet;
//! use service_scaffold::normalize::normalize_config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let answers = AnswerSet::from_value(json!({
//!     "name": "my-service",
//!     "_config": {"_sqlProvider": "postgres", "_sqlHost": "db"},
//! }))?;
//! let config = normalize_config(&answers.raw_config()?)?;
//! assert!(config.has_sequelize());
//! # Ok(())
//! # }
//! ```

pub mod answers;
pub mod cli;
pub mod config;
pub mod core;
pub mod directive;
pub mod normalize;
pub mod scaffold;
pub mod templating;

// Shared by unit tests and the integration suite
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
