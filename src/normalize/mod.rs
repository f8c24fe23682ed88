//! Answer normalization.
//!
//! Raw answers feed three independent normalizers:
//!
//! - [`config`] - `_config` answers to the configuration tree with `$ref`/`$join` directives
//! - [`dependencies`] - `_dependencies` plugin names to runtime/dev dependency sets
//! - [`package`] - publishable answers to the `package.json` manifest
//!
//! All three are pure: they take their registries and baselines as arguments and
//! return new values without touching the input.

pub mod config;
pub mod dependencies;
pub mod package;

pub use config::{ConfigTree, normalize_config};
pub use dependencies::{
    DependencyMap, DependencySet, PluginRegistry, PluginSpec, normalize_dependencies,
};
pub use package::{Manifest, extract_package};

use crate::answers::AnswerSet;
use crate::core::ScaffoldError;

/// The three structures derived from one answer set.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAnswers {
    pub config: ConfigTree,
    pub dependencies: DependencySet,
    pub package: Manifest,
}

/// Run all three normalizers over `answers`.
///
/// # Errors
///
/// Returns [`ScaffoldError::Validation`] when `_config` or `_dependencies` has an
/// invalid shape.
pub fn normalize_answers(
    answers: &AnswerSet,
    registry: &PluginRegistry,
    baseline: &DependencyMap,
) -> Result<NormalizedAnswers, ScaffoldError> {
    let dependencies = normalize_dependencies(&answers.selected_dependencies()?, registry, baseline);
    let config = normalize_config(&answers.raw_config()?)?;
    let package = extract_package(answers);

    tracing::debug!(
        "Normalized answers: {} app(s), {} runtime and {} dev dependencies",
        config.app_names().len(),
        dependencies.dependencies.len(),
        dependencies.dev_dependencies.len()
    );

    Ok(NormalizedAnswers {
        config,
        dependencies,
        package,
    })
}
