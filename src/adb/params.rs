//! Call parameters as seen by the builder: a JSON object keyed by the
//! camelCase names used on the wire. `null` and absent keys are equivalent.

use serde::Serialize;
use serde_json::{Map, Value};

use super::DispatchError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

/// One typed intent extra, still carrying its raw type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtra {
    pub kind: String,
    pub key: String,
    pub value: String,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a JSON object (or `null`, meaning no parameters).
    pub fn from_value(value: Value) -> Result<Self, DispatchError> {
        match value {
            Value::Object(map) => Ok(Params(map)),
            Value::Null => Ok(Params::new()),
            other => Err(DispatchError::validation(format!(
                "parameters must be a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }

    /// Convert a typed parameter struct into the builder's view.
    pub fn from_serialize<T: Serialize>(typed: &T) -> Result<Self, DispatchError> {
        let value = serde_json::to_value(typed)
            .map_err(|e| DispatchError::validation(format!("unserializable parameters: {e}")))?;
        Self::from_value(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Boolean parameter; `default` applies when absent.
    pub fn switch(&self, key: &str, default: bool) -> Result<bool, DispatchError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(type_mismatch(key, "boolean", other)),
        }
    }

    /// String parameter, returned as-is (empty strings included).
    pub fn text(&self, key: &str) -> Result<Option<&str>, DispatchError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(type_mismatch(key, "string", other)),
        }
    }

    /// Array of strings; absent means empty.
    pub fn list(&self, key: &str) -> Result<Vec<&str>, DispatchError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| type_mismatch(key, "array of strings", item))
                })
                .collect(),
            Some(other) => Err(type_mismatch(key, "array of strings", other)),
        }
    }

    /// Array of `{type, key, value}` objects. Non-string scalar values are
    /// stringified (`1`, `true`); the type tag is checked by the builder.
    pub fn extras(&self, key: &str) -> Result<Vec<RawExtra>, DispatchError> {
        let items = match self.get(key) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(type_mismatch(key, "array of extras", other)),
        };

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let obj = item.as_object().ok_or_else(|| {
                    DispatchError::validation(format!("{key}[{idx}] must be an object"))
                })?;
                let field = |name: &str| -> Result<String, DispatchError> {
                    match obj.get(name) {
                        Some(Value::String(s)) => Ok(s.clone()),
                        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
                        _ => Err(DispatchError::validation(format!(
                            "{key}[{idx}].{name} must be a string"
                        ))),
                    }
                };
                Ok(RawExtra {
                    kind: field("type")?,
                    key: field("key")?,
                    value: field("value")?,
                })
            })
            .collect()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params(map)
    }
}

fn type_mismatch(key: &str, expected: &str, got: &Value) -> DispatchError {
    DispatchError::validation(format!(
        "parameter '{key}' must be a {expected}, got {}",
        json_type(got)
    ))
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
