//! Per-render template context.
//!
//! Every top-level key `k` of the data object yields two bindings:
//!
//! - `_k` - the raw value, for conditionals, loops and field access
//! - `k` - the value serialized once in the requested [`SerializeMode`]
//!
//! A template therefore embeds a whole sub-tree with `{{ config }}` and inspects
//! it with `{% if _config.sequelize %}`.

use serde_json::{Map, Value};

use super::serialize::{SerializeMode, serialize_value};
use crate::answers::json_type_name;
use crate::core::ScaffoldError;

/// Raw and serialized form of one data key.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBinding {
    pub key: String,
    pub raw: Value,
    pub serialized: String,
}

impl RenderBinding {
    /// Name the raw value is bound under.
    pub fn shadow_key(&self) -> String {
        shadow_key(&self.key)
    }
}

fn shadow_key(key: &str) -> String {
    format!("_{key}")
}

/// Bindings for a single render call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    bindings: Vec<RenderBinding>,
}

impl RenderContext {
    /// Build the bindings for `data`.
    ///
    /// `null` is treated as "no data" and yields an empty context.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Serialization`] when `data` is not an object, when a
    /// value cannot be serialized, or when a key's shadow name is itself a data key.
    pub fn build(data: &Value, mode: SerializeMode) -> Result<Self, ScaffoldError> {
        let map = match data {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(ScaffoldError::serialization(
                    "<data>",
                    format!("render data must be an object, found {}", json_type_name(other)),
                ));
            }
        };

        check_shadow_collisions(map)?;

        let bindings = map
            .iter()
            .map(|(key, raw)| {
                let serialized = serialize_value(raw, mode)
                    .map_err(|reason| ScaffoldError::serialization(key.as_str(), reason))?;
                Ok(RenderBinding {
                    key: key.clone(),
                    raw: raw.clone(),
                    serialized,
                })
            })
            .collect::<Result<Vec<_>, ScaffoldError>>()?;

        Ok(Self {
            bindings,
        })
    }

    pub fn bindings(&self) -> &[RenderBinding] {
        &self.bindings
    }

    pub fn get(&self, key: &str) -> Option<&RenderBinding> {
        self.bindings.iter().find(|binding| binding.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Tera context holding both bindings for every key.
    pub fn to_tera(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for binding in &self.bindings {
            context.insert(binding.shadow_key(), &binding.raw);
            context.insert(binding.key.as_str(), &binding.serialized);
        }
        context
    }
}

fn check_shadow_collisions(map: &Map<String, Value>) -> Result<(), ScaffoldError> {
    match map.keys().find(|key| map.contains_key(&shadow_key(key))) {
        Some(key) => Err(ScaffoldError::serialization(
            key.as_str(),
            format!("raw value would be bound as '{}', which is also a data key", shadow_key(key)),
        )),
        None => Ok(()),
    }
}
