//! Selected plugin names to categorized npm dependency sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version constraint written for every generated dependency.
pub const WILDCARD_VERSION: &str = "*";

/// Registry entry for a known plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    /// Install as a development dependency
    #[serde(default)]
    pub dev: bool,
}

/// Known plugins by package name.
pub type PluginRegistry = BTreeMap<String, PluginSpec>;

/// Package name to version constraint.
pub type DependencyMap = BTreeMap<String, String>;

/// Runtime and development dependencies of the generated project.
///
/// A package name never appears in both maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    pub dependencies: DependencyMap,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: DependencyMap,
}

/// Runtime dependencies every generated project starts with.
pub fn default_baseline() -> DependencyMap {
    ["bi-service", "bluebird", "lodash"]
        .into_iter()
        .map(|name| (name.to_string(), WILDCARD_VERSION.to_string()))
        .collect()
}

/// Plugins offered by the dependency question.
pub fn default_registry() -> PluginRegistry {
    let runtime = [
        "bi-service-doc",
        "bi-service-sdk",
        "bi-service-sequelize-migrations",
        "sequelize",
        "mysql",
        "pg",
        "pg-hstore",
        "couchbase",
        "kouchbase-odm",
    ];
    let dev = ["mocha", "chai", "chai-as-promised", "sinon", "sinon-chai", "istanbul"];

    runtime
        .into_iter()
        .map(|name| (name.to_string(), PluginSpec { dev: false }))
        .chain(dev.into_iter().map(|name| (name.to_string(), PluginSpec { dev: true })))
        .collect()
}

/// Split `selected` plugin names into runtime and development dependencies.
///
/// `dependencies` is seeded with `baseline`. Names missing from `registry` are
/// skipped. A dev plugin that is already a baseline package stays a runtime
/// dependency only.
pub fn normalize_dependencies(
    selected: &[String],
    registry: &PluginRegistry,
    baseline: &DependencyMap,
) -> DependencySet {
    let mut set = DependencySet {
        dependencies: baseline.clone(),
        dev_dependencies: DependencyMap::new(),
    };

    for name in selected {
        let Some(spec) = registry.get(name) else {
            tracing::debug!("Skipping unknown plugin '{}'", name);
            continue;
        };

        if spec.dev && !set.dependencies.contains_key(name) {
            set.dev_dependencies.insert(name.clone(), WILDCARD_VERSION.to_string());
        } else if !spec.dev {
            set.dependencies.insert(name.clone(), WILDCARD_VERSION.to_string());
        }
    }

    set
}
