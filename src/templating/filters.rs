//! Custom Tera filters for scaffold templates.
//!
//! - `indent(width=4)` - prefix every line after the first with `width` spaces,
//!   leaving blank lines empty. Used to nest a serialized block inside a
//!   literal one:
//!
//!   ```text
//!   module.exports = {{ config | indent(width=4) }};
//!   ```
//!
//! - `json5` / `json` - serialize an arbitrary (raw) value the same way
//!   top-level keys are serialized, for sub-trees reached through `_key`:
//!
//!   ```text
//!   listen: {{ _config.listen | json5 | indent(width=4) }},
//!   ```

use serde_json::Value;
use std::collections::HashMap;

use super::serialize::{INDENT, SerializeMode, serialize_value};

const DEFAULT_INDENT_WIDTH: usize = INDENT.len();

/// Register every scaffold filter on `tera`.
pub fn register_all(tera: &mut tera::Tera) {
    tera.register_filter("indent", indent_filter);
    tera.register_filter("json5", json5_filter);
    tera.register_filter("json", json_filter);
}

fn indent_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("Filter `indent` expects a string"))?;

    let width = match args.get("width") {
        None => DEFAULT_INDENT_WIDTH,
        Some(width) => width
            .as_u64()
            .and_then(|w| usize::try_from(w).ok())
            .ok_or_else(|| tera::Error::msg("Filter `indent`: `width` must be a non-negative integer"))?,
    };

    Ok(Value::String(indent_lines(text, width)))
}

/// Indent every line of `text` except the first by `width` spaces.
pub fn indent_lines(text: &str, width: usize) -> String {
    let prefix = " ".repeat(width);
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&prefix);
            }
        }
        out.push_str(line);
    }
    out
}

fn json5_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    serialize_filter(value, SerializeMode::Relaxed)
}

fn json_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    serialize_filter(value, SerializeMode::Plain)
}

fn serialize_filter(value: &Value, mode: SerializeMode) -> tera::Result<Value> {
    serialize_value(value, mode).map(Value::String).map_err(tera::Error::msg)
}
