//! Parsing and typed access for tool call arguments.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::BridgeError;

/// Why a tool call's raw argument payload could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentParseError {
    #[error("invalid JSON in tool arguments: {0}")]
    InvalidJson(String),
    #[error("tool arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A parsed argument object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Parse a serialized argument object. Blank input is an empty object.
    pub fn parse(raw: &str) -> Result<Self, ArgumentParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(values)) => Ok(Self { values }),
            Ok(other) => Err(ArgumentParseError::NotAnObject(json_type_name(&other))),
            Err(e) => Err(ArgumentParseError::InvalidJson(e.to_string())),
        }
    }

    /// The arguments as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, BridgeError> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| BridgeError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer argument, accepting numeric strings.
    pub fn get_i64(&self, key: &str) -> Result<i64, BridgeError> {
        self.values
            .get(key)
            .and_then(|v| match v {
                Value::String(s) => s.trim().parse().ok(),
                other => other.as_i64(),
            })
            .ok_or_else(|| BridgeError::InvalidArgument(format!("Missing integer argument: {key}")))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, BridgeError> {
        self.values
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| BridgeError::InvalidArgument(format!("Missing boolean argument: {key}")))
    }

    /// Deserialize the whole object into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, BridgeError> {
        serde_json::from_value(self.to_value()).map_err(|e| {
            BridgeError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
