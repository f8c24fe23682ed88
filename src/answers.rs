//! Answer sets collected from the user.
//!
//! An [`AnswerSet`] maps question keys to answer values. Keys matching
//! `^_.+$` are *internal*: they drive normalization (`_config`,
//! `_dependencies`) and never reach the published `package.json`. Every other
//! key is a publishable manifest field.
//!
//! Answers are collected outside this crate and handed over as a JSON object.
//! Baseline manifest fields are deep-merged underneath them with
//! [`AnswerSet::with_defaults`].

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::LazyLock;

use crate::core::ScaffoldError;

static INTERNAL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_.+$").expect("internal key pattern is valid"));

/// Key holding the raw configuration answers.
pub const CONFIG_KEY: &str = "_config";

/// Key holding the list of selected plugin names.
pub const DEPENDENCIES_KEY: &str = "_dependencies";

/// Whether `key` names an internal answer field.
///
/// A lone `_` is not internal; the marker needs at least one following character.
pub fn is_internal_key(key: &str) -> bool {
    INTERNAL_KEY.is_match(key)
}

/// Question key to answer value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(Map<String, Value>);

impl AnswerSet {
    pub fn new(answers: Map<String, Value>) -> Self {
        Self(answers)
    }

    /// Build from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ScaffoldError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ScaffoldError::validation(
                "<answers>",
                format!("expected an object, found {}", json_type_name(&other)),
            )),
        }
    }

    /// Load answers from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read answers file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse answers file: {}", path.display()))?;
        Ok(Self::from_value(value)?)
    }

    /// Return these answers deep-merged over `defaults`.
    ///
    /// Objects merge key by key; any other answer value replaces the default.
    #[must_use]
    pub fn with_defaults(self, defaults: &Map<String, Value>) -> Self {
        let mut merged = defaults.clone();
        merge_maps(&mut merged, self.0);
        Self(merged)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The raw configuration answers under [`CONFIG_KEY`].
    ///
    /// A missing key yields an empty object.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the value is present but not an object.
    pub fn raw_config(&self) -> Result<Map<String, Value>, ScaffoldError> {
        match self.0.get(CONFIG_KEY) {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(other) => Err(ScaffoldError::validation(
                CONFIG_KEY,
                format!("expected an object, found {}", json_type_name(other)),
            )),
        }
    }

    /// Selected plugin names under [`DEPENDENCIES_KEY`].
    ///
    /// # Errors
    ///
    /// Returns a validation error when the value is not a list of strings.
    pub fn selected_dependencies(&self) -> Result<Vec<String>, ScaffoldError> {
        match self.0.get(DEPENDENCIES_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        ScaffoldError::validation(
                            format!("{DEPENDENCIES_KEY}[{i}]"),
                            format!("expected a string, found {}", json_type_name(item)),
                        )
                    })
                })
                .collect(),
            Some(other) => Err(ScaffoldError::validation(
                DEPENDENCIES_KEY,
                format!("expected a list, found {}", json_type_name(other)),
            )),
        }
    }
}

fn merge_maps(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match value {
            Value::Object(nested) => {
                if let Some(Value::Object(existing)) = base.get_mut(&key) {
                    merge_maps(existing, nested);
                } else {
                    base.insert(key, Value::Object(nested));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Short JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
