//! Truthiness rule for optional envelope fields.
//!
//! A value is "empty" when it is null, `false`, numeric zero, an empty string,
//! an empty array or an empty object. The constructor drops empty arguments and
//! `has_data`/`has_message` report them as absent.

use serde_json::Value;

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
