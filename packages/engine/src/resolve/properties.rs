//! Free-form property bag access
//!
//! SARIF property bags carry arbitrary JSON; these helpers extract the
//! scalar shapes the resolution chains consume, recovering locally from
//! malformed values.

use serde_json::{Map, Value};

pub(crate) fn string_property(props: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    match props?.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Float property with a default; a value that fails to parse logs a
/// warning and yields the default, never an error.
pub(crate) fn float_property(
    props: Option<&Map<String, Value>>,
    key: &str,
    default: f32,
) -> f32 {
    let Some(raw) = string_property(props, key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            log::warn!("error converting {key} string '{raw}' to float: {e}");
            default
        }
    }
}

pub(crate) fn string_list_property(props: Option<&Map<String, Value>>, key: &str) -> Vec<String> {
    match props.and_then(|p| p.get(key)) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
