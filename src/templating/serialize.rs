//! Plain JSON and relaxed (JSON5) serialization of render values.
//!
//! Both modes pretty-print with four-space indentation and keep object keys in
//! insertion order.
//!
//! Relaxed output follows the JSON5 conventions used for hand-edited config
//! files:
//! - keys that are identifiers are written bare (`$ref: '#/a'`)
//! - strings use single quotes unless the text holds more single than double quotes
//! - every non-empty object and array ends with a trailing comma

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

/// Indentation unit for both modes.
pub const INDENT: &str = "    ";

/// Deepest nesting level accepted for serialization.
///
/// Values are owned trees and cannot be cyclic; unbounded nesting is the
/// remaining way for a value to be unserializable, and it is rejected here
/// instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Output syntax for serialized render values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SerializeMode {
    /// Strict JSON
    #[default]
    Plain,
    /// JSON5 with unquoted keys and trailing commas
    Relaxed,
}

/// Serialize `value` in `mode`.
///
/// # Errors
///
/// Returns a description of the failure when `value` nests deeper than
/// [`MAX_NESTING_DEPTH`] or the JSON writer fails.
pub fn serialize_value(value: &Value, mode: SerializeMode) -> Result<String, String> {
    check_depth(value)?;
    match mode {
        SerializeMode::Plain => to_plain(value),
        SerializeMode::Relaxed => {
            let mut out = String::new();
            write_relaxed(&mut out, value, 0);
            Ok(out)
        }
    }
}

fn check_depth(value: &Value) -> Result<(), String> {
    // Iterative walk so the guard itself cannot overflow.
    let mut stack = vec![(value, 0usize)];
    while let Some((value, depth)) = stack.pop() {
        if depth > MAX_NESTING_DEPTH {
            return Err(format!(
                "value nests deeper than {MAX_NESTING_DEPTH} levels (cyclic or runaway structure)"
            ));
        }
        match value {
            Value::Array(items) => stack.extend(items.iter().map(|item| (item, depth + 1))),
            Value::Object(map) => stack.extend(map.values().map(|item| (item, depth + 1))),
            _ => {}
        }
    }
    Ok(())
}

fn to_plain(value: &Value) -> Result<String, String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(|e| e.to_string())?;
    String::from_utf8(buf).map_err(|e| e.to_string())
}

fn write_relaxed(out: &mut String, value: &Value, level: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&quote_string(s)),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for item in items {
                push_indent(out, level + 1);
                write_relaxed(out, item, level + 1);
                out.push_str(",\n");
            }
            push_indent(out, level);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (key, item) in map {
                push_indent(out, level + 1);
                out.push_str(&relaxed_key(key));
                out.push_str(": ");
                write_relaxed(out, item, level + 1);
                out.push_str(",\n");
            }
            push_indent(out, level);
            out.push('}');
        }
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn relaxed_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote_string(key)
    }
}

/// ES5 `IdentifierName`: `$`, `_` or ID_Start first, then ID_Continue, `$`, ZWNJ or ZWJ.
///
/// Anything else must be quoted or a JSON5 reader rejects the key.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '$' || first == '_' || unicode_ident::is_xid_start(first))
        && chars.all(|c| {
            c == '$' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
        })
}

/// Quote `text` with whichever quote character needs fewer escapes, single on ties.
fn quote_string(text: &str) -> String {
    let singles = text.matches('\'').count();
    let doubles = text.matches('"').count();
    let quote = if singles > doubles { '"' } else { '\'' };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            '\0' => {
                if chars.peek().is_some_and(char::is_ascii_digit) {
                    out.push_str("\\x00");
                } else {
                    out.push_str("\\0");
                }
            }
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c < ' ' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
