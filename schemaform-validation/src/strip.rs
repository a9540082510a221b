//! Empty-value stripping.
//!
//! A key the user left blank must be absent, not present-but-empty, or the
//! `required` keyword never fires for it.

use serde_json::Value;

/// `null`, `""`, `[]` and `{}` count as empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Copy of `data` with every empty object member removed.
///
/// Nested objects are stripped too, and an object left empty by stripping
/// is removed from its parent. Array items are kept as submitted.
pub fn strip_empty(data: &Value) -> Value {
    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), strip_empty(value)))
                .filter(|(_, value)| !is_empty_value(value))
                .collect(),
        ),
        other => other.clone(),
    }
}
