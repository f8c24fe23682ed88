//! Project generation.
//!
//! [`run`] drives one generation end to end:
//!
//! 1. merge the answers over the manifest defaults
//! 2. normalize them into config tree, dependency sets and manifest
//! 3. fetch the license text (unless disabled or the license is `"None"`)
//! 4. render every file into a [`ScaffoldPlan`]
//! 5. create directories, then write all files concurrently
//! 6. install runtime, then development dependencies
//!
//! The first failure aborts the run; nothing already written is rolled back.

pub mod installer;
pub mod license;
pub mod plan;
pub mod writer;

pub use installer::Installer;
pub use license::LicenseClient;
pub use plan::{OutputFile, ScaffoldPlan};
pub use writer::write_plan;

use anyhow::Result;
use chrono::Datelike;
use serde_json::Value;
use std::path::PathBuf;

use crate::answers::AnswerSet;
use crate::config::GeneratorConfig;
use crate::normalize::{Manifest, NormalizedAnswers, normalize_answers};
use crate::templating::{LayeredTemplates, TemplateRenderer};

/// Per-run switches on top of [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Project root; created if missing.
    pub target_dir: PathBuf,
    /// Template override directory, taking precedence over the configured one.
    pub template_dir: Option<PathBuf>,
    pub skip_install: bool,
    pub fetch_license: bool,
}

impl ScaffoldOptions {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            template_dir: None,
            skip_install: false,
            fetch_license: true,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct ScaffoldSummary {
    pub normalized: NormalizedAnswers,
    pub directories: usize,
    pub files: Vec<PathBuf>,
    pub installed: bool,
}

/// Generate a project from `answers` into `options.target_dir`.
///
/// # Errors
///
/// Returns the first normalization, license, rendering, write or install error.
pub async fn run(answers: AnswerSet, config: &GeneratorConfig, options: &ScaffoldOptions) -> Result<ScaffoldSummary> {
    let answers = answers.with_defaults(&config.manifest_defaults());
    let normalized = normalize_answers(&answers, &config.plugin_registry(), &config.baseline())?;

    let license = if options.fetch_license {
        fetch_license(config, &normalized.package).await?
    } else {
        tracing::debug!("License fetch disabled");
        None
    };

    let template_dir = options.template_dir.clone().or_else(|| config.template_dir.clone());
    let renderer = TemplateRenderer::new(LayeredTemplates::standard(template_dir));
    let plan = ScaffoldPlan::build(&renderer, &normalized, license.as_deref())?;

    tokio::fs::create_dir_all(&options.target_dir).await?;
    write_plan(&options.target_dir, &plan).await?;

    let installed = !(options.skip_install || config.skip_install);
    if installed {
        Installer::new(&config.npm_command, &options.target_dir)
            .install_all(&normalized.dependencies)
            .await?;
    } else {
        tracing::info!("Skipping dependency installation");
    }

    Ok(ScaffoldSummary {
        directories: plan.directories.len(),
        files: plan.files.into_iter().map(|file| file.path).collect(),
        normalized,
        installed,
    })
}

async fn fetch_license(config: &GeneratorConfig, package: &Manifest) -> Result<Option<String>> {
    let Some(name) = package.get("license").and_then(Value::as_str) else {
        tracing::debug!("No license answered");
        return Ok(None);
    };

    let client = LicenseClient::new(&config.github_api_url);
    let text = client.fetch(name).await?;
    let year = chrono::Local::now().year();
    Ok(text.map(|text| license::fill_placeholders(&text, year, author_name(package))))
}

/// Author name from either `"author": "Name <mail>"` or `"author": {"name": ...}`.
fn author_name(package: &Manifest) -> Option<&str> {
    match package.get("author")? {
        Value::String(author) => {
            let name = author.split(['<', '(']).next().unwrap_or(author).trim();
            (!name.is_empty()).then_some(name)
        }
        Value::Object(author) => author.get("name").and_then(Value::as_str),
        _ => None,
    }
}
