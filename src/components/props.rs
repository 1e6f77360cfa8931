use serde_json::Value;

use super::NodeError;
use crate::graph::model::PropertyMap;

/// Read-only view over a node's properties.
///
/// Lookups consult the external property table entry first and fall back to the node's inline
/// data. JSON `null` counts as absent in both.
#[derive(Clone, Copy, Debug)]
pub struct PropertyView<'a> {
    props: &'a PropertyMap,
    data: &'a PropertyMap,
}

impl<'a> PropertyView<'a> {
    /// View over `props` with `data` as fallback.
    pub fn new(props: &'a PropertyMap, data: &'a PropertyMap) -> Self {
        Self { props, data }
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.props
            .get(key)
            .filter(|v| !v.is_null())
            .or_else(|| self.data.get(key).filter(|v| !v.is_null()))
    }

    /// String value, or `default` when absent.
    pub fn string_or(&self, key: &str, default: &str) -> Result<String, NodeError> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(invalid(key, format!("expected a string, got {}", kind(other)))),
        }
    }

    /// Non-empty string value; absence is an error.
    pub fn required_string(&self, key: &str) -> Result<String, NodeError> {
        match self.get(key) {
            None => Err(invalid(key, "is required")),
            Some(Value::String(s)) if s.trim().is_empty() => Err(invalid(key, "must be non-empty")),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(invalid(key, format!("expected a string, got {}", kind(other)))),
        }
    }

    /// Finite number, or `default` when absent. Numeric strings are accepted.
    pub fn number_or(&self, key: &str, default: f64) -> Result<f64, NodeError> {
        let n = match self.get(key) {
            None => return Ok(default),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(default),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(other) => {
                return Err(invalid(key, format!("expected a number, got {}", kind(other))));
            }
        };
        match n {
            Some(n) if n.is_finite() => Ok(n),
            _ => Err(invalid(key, "must be a finite number")),
        }
    }

    /// Like [`PropertyView::number_or`] but rejects negative values.
    pub fn non_negative_or(&self, key: &str, default: f64) -> Result<f64, NodeError> {
        let n = self.number_or(key, default)?;
        if n < 0.0 {
            return Err(invalid(key, "must be >= 0"));
        }
        Ok(n)
    }

    /// Boolean value, or `default` when absent. `"true"`/`"false"` strings are accepted.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, NodeError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(invalid(key, format!("expected a boolean, got \"{s}\""))),
            },
            Some(other) => Err(invalid(key, format!("expected a boolean, got {}", kind(other)))),
        }
    }

    /// Non-negative integer; absence is an error.
    pub fn required_u64(&self, key: &str) -> Result<u64, NodeError> {
        match self.get(key) {
            None => Err(invalid(key, "is required")),
            Some(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| invalid(key, "must be a non-negative integer")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(key, "must be a non-negative integer")),
            Some(other) => Err(invalid(key, format!("expected an integer, got {}", kind(other)))),
        }
    }
}

pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> NodeError {
    NodeError::InvalidProperty {
        key: key.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/props.rs"]
mod tests;
