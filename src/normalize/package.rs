//! Publishable `package.json` fields from an answer set.

use serde_json::{Map, Value};

use crate::answers::{AnswerSet, is_internal_key};

/// Publishable manifest fields.
pub type Manifest = Map<String, Value>;

/// Copy every non-internal answer into a new manifest.
///
/// Values are cloned, so the manifest shares no structure with `answers`.
pub fn extract_package(answers: &AnswerSet) -> Manifest {
    answers
        .iter()
        .filter(|(key, _)| !is_internal_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
