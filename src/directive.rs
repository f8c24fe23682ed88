//! Deferred-reference directives embedded in generated configuration.
//!
//! Generated config files contain two directive shapes that a downstream loader
//! resolves at runtime:
//!
//! - `{"$ref": "#/storage/mysql/host"}` - a pointer into the same document
//! - `{"$join": ["http://127.0.0.1:", {"$ref": "#/listen/api/port"}]}` - string
//!   concatenation of literals and references
//!
//! This module only builds and serializes them. It never resolves a pointer and
//! never checks that the target exists.
//!
//! [`ConfigValue`] is the node type of a configuration tree: a literal JSON value,
//! an ordered section of named children, or one of the two directives.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::core::ScaffoldError;

/// Object key tagging a reference directive.
pub const REF_KEY: &str = "$ref";

/// Object key tagging a join directive.
pub const JOIN_KEY: &str = "$join";

/// A `#/a/b/c` pointer into the configuration tree it is embedded in.
///
/// Segments are literal object keys or array indices. There is no escaping: a
/// segment is any non-empty string without `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pointer(String);

impl Pointer {
    /// Build a pointer from path segments.
    ///
    /// # Errors
    ///
    /// Returns a validation error when there are no segments, or when a segment
    /// is empty or contains `/`.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, ScaffoldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pointer = String::from("#");
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() || segment.contains('/') {
                return Err(ScaffoldError::validation(
                    "$ref",
                    format!("invalid pointer segment '{segment}'"),
                ));
            }
            pointer.push('/');
            pointer.push_str(segment);
        }
        if pointer.len() == 1 {
            return Err(ScaffoldError::validation("$ref", "pointer has no segments"));
        }
        Ok(Self(pointer))
    }

    /// Parse a pointer in `#/a/b` form.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the input starts with `#/` and every
    /// segment is non-empty.
    pub fn parse(pointer: &str) -> Result<Self, ScaffoldError> {
        let Some(path) = pointer.strip_prefix("#/") else {
            return Err(ScaffoldError::validation(
                "$ref",
                format!("pointer '{pointer}' must start with '#/'"),
            ));
        };
        Self::from_segments(path.split('/'))
    }

    /// The pointer text, e.g. `#/listen/api/port`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments after the leading `#`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0[2..].split('/')
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of a `$join` directive.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinPart {
    Literal(String),
    Ref(Pointer),
}

impl JoinPart {
    /// Plain JSON form: a string or a `$ref` object.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Literal(text) => text.as_str().into(),
            Self::Ref(pointer) => tagged(REF_KEY, pointer.as_str().into()),
        }
    }
}

fn tagged(key: &str, value: serde_json::Value) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), value);
    serde_json::Value::Object(map)
}

impl Serialize for JoinPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(text) => serializer.serialize_str(text),
            Self::Ref(pointer) => serialize_ref(pointer, serializer),
        }
    }
}

/// Node of a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Plain JSON value copied from the answers or a fixed setting
    Literal(serde_json::Value),
    /// Ordered mapping of child nodes
    Section(IndexMap<String, ConfigValue>),
    /// Deferred reference, serialized as `{"$ref": pointer}`
    Ref(Pointer),
    /// Deferred concatenation, serialized as `{"$join": [...]}`
    Join(Vec<JoinPart>),
}

impl ConfigValue {
    /// An empty section.
    pub fn section() -> Self {
        Self::Section(IndexMap::new())
    }

    /// A reference to `segments`.
    ///
    /// # Errors
    ///
    /// See [`Pointer::from_segments`].
    pub fn reference<I, S>(segments: I) -> Result<Self, ScaffoldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Pointer::from_segments(segments).map(Self::Ref)
    }

    /// Child node of a section by key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            Self::Section(children) => children.get(key),
            _ => None,
        }
    }

    /// Whether this node is a directive rather than data.
    pub fn is_directive(&self) -> bool {
        matches!(self, Self::Ref(_) | Self::Join(_))
    }

    /// Convert to a plain JSON value with directives in their on-disk shape.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Section(children) => serde_json::Value::Object(
                children.iter().map(|(key, child)| (key.clone(), child.to_json())).collect(),
            ),
            Self::Ref(pointer) => tagged(REF_KEY, pointer.as_str().into()),
            Self::Join(parts) => tagged(JOIN_KEY, parts.iter().map(JoinPart::to_json).collect()),
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Literal(value)
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(value) => value.serialize(serializer),
            Self::Section(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
            Self::Ref(pointer) => serialize_ref(pointer, serializer),
            Self::Join(parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(JOIN_KEY, &JoinParts(parts))?;
                map.end()
            }
        }
    }
}

struct JoinParts<'a>(&'a [JoinPart]);

impl Serialize for JoinParts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for part in self.0 {
            seq.serialize_element(part)?;
        }
        seq.end()
    }
}

fn serialize_ref<S: Serializer>(pointer: &Pointer, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(REF_KEY, pointer.as_str())?;
    map.end()
}
