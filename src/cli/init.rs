//! Generate a project from an answers file.
//!
//! ```bash
//! scaffold init --answers answers.json --path ./my-service
//! ```
//!
//! The answers file is a JSON object of question keys to answers, e.g.:
//!
//! ```json
//! {
//!     "name": "my-service",
//!     "version": "1.0.0",
//!     "license": "MIT License",
//!     "_dependencies": ["mysql", "mocha"],
//!     "_config": {
//!         "_sqlProvider": "mysql",
//!         "_sqlHost": "localhost",
//!         "_apps": ["public", "public-doc"],
//!         "_host": "http://127.0.0.1",
//!         "listen": {"public": {"port": 3000}, "public-doc": {"port": 3001}}
//!     }
//! }
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::answers::AnswerSet;
use crate::config::GeneratorConfig;
use crate::scaffold::{self, ScaffoldOptions};

#[derive(Args)]
pub struct InitCommand {
    /// JSON file with the collected answers
    #[arg(long)]
    answers: PathBuf,

    /// Project directory (created if missing)
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Directory of `<name>.tera` files overriding built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Do not run the package installer
    #[arg(long)]
    skip_install: bool,

    /// Do not fetch license text
    #[arg(long)]
    no_license: bool,
}

impl InitCommand {
    pub async fn execute(self, config: &GeneratorConfig, quiet: bool) -> Result<()> {
        let answers = AnswerSet::load(&self.answers).await?;

        let options = ScaffoldOptions {
            target_dir: self.path.clone(),
            template_dir: self.templates,
            skip_install: self.skip_install,
            fetch_license: !self.no_license,
        };
        let summary = scaffold::run(answers, config, &options).await?;

        if !quiet {
            println!(
                "{} Generated {} files in {}",
                "✓".green(),
                summary.files.len(),
                self.path.display()
            );
            if !summary.installed {
                println!("  {} dependencies were not installed", "!".yellow());
            }
        }
        Ok(())
    }
}
