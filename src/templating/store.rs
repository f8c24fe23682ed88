//! Template lookup by name.
//!
//! The renderer only needs "raw text for a name, or a distinct not-found error".
//! Three stores are provided:
//!
//! - [`EmbeddedTemplates`] - the templates compiled into the binary
//! - [`DirectoryTemplates`] - `<root>/<name>.tera` files on disk
//! - [`LayeredTemplates`] - ordered list of stores, first hit wins

use std::path::PathBuf;
use strsim::levenshtein;

use crate::core::ScaffoldError;

/// File extension of on-disk templates.
pub const TEMPLATE_EXTENSION: &str = "tera";

/// Maximum edit distance, as a percentage of the requested name, for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Read-only source of named text templates.
pub trait TemplateStore: Send + Sync {
    /// Raw template text for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateNotFound`] when the store has no such template.
    fn lookup(&self, name: &str) -> Result<String, ScaffoldError>;

    /// Names this store can serve.
    fn names(&self) -> Vec<String>;
}

/// Not-found error for `name` with up to three close names from `available`.
pub fn not_found(name: &str, available: &[String]) -> ScaffoldError {
    let mut scored: Vec<_> =
        available.iter().map(|candidate| (candidate, levenshtein(name, candidate))).collect();
    scored.sort_by_key(|(_, distance)| *distance);

    let suggestions = scored
        .into_iter()
        .filter(|(_, distance)| *distance <= name.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(candidate, _)| candidate.clone())
        .collect();

    ScaffoldError::TemplateNotFound {
        name: name.to_string(),
        suggestions,
    }
}

const EMBEDDED: &[(&str, &str)] = &[
    ("package", include_str!("../../templates/package.tera")),
    ("config", include_str!("../../templates/config.tera")),
    ("index", include_str!("../../templates/index.tera")),
    ("LICENSE", include_str!("../../templates/LICENSE.tera")),
    ("CHANGELOG", include_str!("../../templates/CHANGELOG.tera")),
    ("app", include_str!("../../templates/app.tera")),
    ("gitignore", include_str!("../../templates/gitignore.tera")),
    ("npmignore", include_str!("../../templates/npmignore.tera")),
    ("test", include_str!("../../templates/test.tera")),
    ("sequelize", include_str!("../../templates/sequelize.tera")),
    ("couchbase", include_str!("../../templates/couchbase.tera")),
    ("router", include_str!("../../templates/router.tera")),
    ("route", include_str!("../../templates/route.tera")),
];

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateStore for EmbeddedTemplates {
    fn lookup(&self, name: &str) -> Result<String, ScaffoldError> {
        EMBEDDED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, text)| (*text).to_string())
            .ok_or_else(|| not_found(name, &self.names()))
    }

    fn names(&self) -> Vec<String> {
        EMBEDDED.iter().map(|(name, _)| (*name).to_string()).collect()
    }
}

/// Templates stored as `<root>/<name>.tera`.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        // Names are plain identifiers; anything path-like is never looked up.
        let is_plain = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        is_plain.then(|| self.root.join(format!("{name}.{TEMPLATE_EXTENSION}")))
    }
}

impl TemplateStore for DirectoryTemplates {
    fn lookup(&self, name: &str) -> Result<String, ScaffoldError> {
        let Some(path) = self.path_for(name) else {
            return Err(not_found(name, &self.names()));
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!("Using template override {}", path.display());
                Ok(text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(name, &self.names())),
            Err(e) => Err(ScaffoldError::IoError(e)),
        }
    }

    fn names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

/// Ordered stack of stores; the first store that has a name serves it.
#[derive(Default)]
pub struct LayeredTemplates {
    layers: Vec<Box<dyn TemplateStore>>,
}

impl LayeredTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store below the existing ones.
    #[must_use]
    pub fn with_layer(mut self, store: impl TemplateStore + 'static) -> Self {
        self.layers.push(Box::new(store));
        self
    }

    /// `override_dir` (when given) on top of the embedded templates.
    pub fn standard(override_dir: Option<PathBuf>) -> Self {
        let mut layered = Self::new();
        if let Some(dir) = override_dir {
            layered = layered.with_layer(DirectoryTemplates::new(dir));
        }
        layered.with_layer(EmbeddedTemplates)
    }
}

impl TemplateStore for LayeredTemplates {
    fn lookup(&self, name: &str) -> Result<String, ScaffoldError> {
        for layer in &self.layers {
            match layer.lookup(name) {
                Err(ScaffoldError::TemplateNotFound {
                    ..
                }) => continue,
                result => return result,
            }
        }
        Err(not_found(name, &self.names()))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.layers.iter().flat_map(|layer| layer.names()).collect();
        names.sort();
        names.dedup();
        names
    }
}
