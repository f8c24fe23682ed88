//! The set of directories and rendered files for one project.

use serde_json::{Value, json};
use std::path::PathBuf;

use crate::core::ScaffoldError;
use crate::normalize::NormalizedAnswers;
use crate::templating::{RenderOptions, TemplateRenderer, TemplateStore};

/// Apps that get no example routes.
pub const APPS_WITHOUT_ROUTES: &[&str] = &["cli"];

const ROUTES_DIR: &str = "lib/routes/v1.0";

/// One rendered file, path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: String,
}

/// Directories (in creation order) and files of a generated project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub directories: Vec<PathBuf>,
    pub files: Vec<OutputFile>,
}

impl ScaffoldPlan {
    /// Render every project file from the normalized answers.
    ///
    /// `license` is the license text to write to `LICENSE`; `None` writes an empty file.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error.
    pub fn build<S: TemplateStore>(
        renderer: &TemplateRenderer<S>,
        normalized: &NormalizedAnswers,
        license: Option<&str>,
    ) -> Result<Self, ScaffoldError> {
        let config = normalized.config.to_json();
        let apps: Vec<String> = normalized
            .config
            .app_names()
            .into_iter()
            .filter(|app| !APPS_WITHOUT_ROUTES.contains(&app.as_str()))
            .collect();

        let mut plan = Self {
            directories: [
                "lib",
                "lib/validation",
                "lib/routes",
                ROUTES_DIR,
                "config",
                "config/development",
                "test",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            files: Vec::new(),
        };

        let plain = RenderOptions::plain();
        plan.add(
            "package.json",
            renderer.render("package", &json!({"package": normalized.package}), plain)?,
        );
        plan.add(
            "config/development/config.json5",
            renderer.render("config", &config, RenderOptions::relaxed())?,
        );
        plan.add(
            "index.js",
            renderer.render(
                "index",
                &json!({"package": installed_package(normalized), "config": config}),
                plain,
            )?,
        );
        plan.add("LICENSE", renderer.render("LICENSE", &json!({"license": license.unwrap_or("")}), plain)?);
        plan.add("CHANGELOG.md", renderer.render_empty("CHANGELOG")?);
        plan.add("lib/app.js", renderer.render("app", &json!({"apps": apps}), plain)?);
        plan.add(".gitignore", renderer.render_empty("gitignore")?);
        plan.add(".npmignore", renderer.render_empty("npmignore")?);
        plan.add("test/test.js", renderer.render_empty("test")?);

        let has_sequelize = normalized.config.has_sequelize();
        let has_couchbase = normalized.config.has_storage("couchbase");
        if has_sequelize || has_couchbase {
            plan.directories.push("lib/database".into());
            plan.directories.push("lib/models".into());
        }
        if has_sequelize {
            plan.directories.push("lib/models/orm".into());
            plan.add("lib/database/sequelize.js", renderer.render_empty("sequelize")?);
        }
        if has_couchbase {
            plan.directories.push("lib/models/odm".into());
            plan.add("lib/database/couchbase.js", renderer.render_empty("couchbase")?);
        }

        for app in &apps {
            let example = PathBuf::from(ROUTES_DIR).join(app).join("example");
            plan.directories.push(PathBuf::from(ROUTES_DIR).join(app));
            plan.directories.push(example.clone());
            plan.directories.push(example.join("routes"));

            plan.add(example.join("router.js"), renderer.render("router", &json!({"app": app}), plain)?);
            plan.add(example.join("routes").join("get.js"), renderer.render_empty("route")?);
        }

        tracing::debug!(
            "Planned {} directories and {} files",
            plan.directories.len(),
            plan.files.len()
        );
        Ok(plan)
    }

    fn add(&mut self, path: impl Into<PathBuf>, content: String) {
        self.files.push(OutputFile {
            path: path.into(),
            content,
        });
    }

    pub fn file(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|file| file.path == std::path::Path::new(path))
    }
}

/// Manifest with the normalized dependency sets in place of the answered ones.
fn installed_package(normalized: &NormalizedAnswers) -> Value {
    let mut package = normalized.package.clone();
    package.insert(
        "dependencies".to_string(),
        json!(normalized.dependencies.dependencies),
    );
    package.insert(
        "devDependencies".to_string(),
        json!(normalized.dependencies.dev_dependencies),
    );
    Value::Object(package)
}
