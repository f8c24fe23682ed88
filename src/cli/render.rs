//! Render one template to stdout.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::templating::{LayeredTemplates, RenderOptions, TemplateRenderer};

#[derive(Args)]
pub struct RenderCommand {
    /// Template name (e.g. `config`, `router`)
    name: String,

    /// JSON object with the render data
    #[arg(long)]
    data: Option<PathBuf>,

    /// Serialize values as JSON5
    #[arg(long)]
    relaxed: bool,

    /// Directory of `<name>.tera` files overriding built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, config: &GeneratorConfig) -> Result<()> {
        let data = match &self.data {
            Some(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read render data: {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse render data: {}", path.display()))?
            }
            None => Value::Null,
        };

        let template_dir = self.templates.or_else(|| config.template_dir.clone());
        let renderer = TemplateRenderer::new(LayeredTemplates::standard(template_dir));
        let options = RenderOptions {
            relaxed: self.relaxed,
        };

        print!("{}", renderer.render(&self.name, &data, options)?);
        Ok(())
    }
}
