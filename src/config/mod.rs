//! Generator configuration.
//!
//! - [`GeneratorConfig`] - user settings loaded from `~/.scaffold/config.toml`
//!   (template override directory, installer command, plugin registry additions,
//!   baseline dependencies and manifest defaults)

pub mod global;

pub use global::{CONFIG_ENV_VAR, GeneratorConfig};
