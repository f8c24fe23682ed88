//! Print normalized answers.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::answers::AnswerSet;
use crate::config::GeneratorConfig;
use crate::core::ScaffoldError;
use crate::normalize::normalize_answers;
use crate::templating::{SerializeMode, serialize_value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Part {
    /// All three structures
    #[default]
    All,
    /// The configuration tree
    Config,
    /// Runtime and development dependency sets
    Dependencies,
    /// The `package.json` manifest
    Package,
}

#[derive(Args)]
pub struct NormalizeCommand {
    /// JSON file with the collected answers
    #[arg(long)]
    answers: PathBuf,

    /// Which structure to print
    #[arg(long, value_enum, default_value_t = Part::All)]
    part: Part,

    /// Print JSON5 instead of JSON
    #[arg(long)]
    relaxed: bool,
}

impl NormalizeCommand {
    pub async fn execute(self, config: &GeneratorConfig) -> Result<()> {
        let answers = AnswerSet::load(&self.answers).await?.with_defaults(&config.manifest_defaults());
        let normalized = normalize_answers(&answers, &config.plugin_registry(), &config.baseline())?;

        let value = match self.part {
            Part::All => json!({
                "config": normalized.config,
                "dependencies": normalized.dependencies,
                "package": normalized.package,
            }),
            Part::Config => normalized.config.to_json(),
            Part::Dependencies => json!(normalized.dependencies),
            Part::Package => Value::Object(normalized.package),
        };

        let mode = if self.relaxed {
            SerializeMode::Relaxed
        } else {
            SerializeMode::Plain
        };
        let text = serialize_value(&value, mode)
            .map_err(|reason| ScaffoldError::serialization("<normalized>", reason))?;
        println!("{text}");
        Ok(())
    }
}
