//! Check parsed tool arguments against a tool's parameter schema.
//!
//! Only the top level of the schema is checked: required keys, declared
//! property types and string enums. Nested schemas are not descended into.

use serde_json::{Map, Value};

use super::arguments::json_type_name;

/// Returns a description of the first violation found.
pub fn validate_arguments(args: &Map<String, Value>, schema: &Value) -> Result<(), String> {
    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str);
    for name in required {
        if !args.contains_key(name) {
            return Err(format!("missing required field '{name}'"));
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };
    for (key, value) in args {
        let Some(prop) = properties.get(key) else {
            continue;
        };
        if let Some(expected) = prop.get("type").and_then(Value::as_str) {
            if !matches_type(value, expected) {
                return Err(format!(
                    "field '{key}' expected type '{expected}', got {}",
                    json_type_name(value)
                ));
            }
        }
        if let (Some(allowed), Some(s)) = (prop.get("enum").and_then(Value::as_array), value.as_str()) {
            if !allowed.iter().any(|v| v.as_str() == Some(s)) {
                return Err(format!("field '{key}' has unsupported value '{s}'"));
            }
        }
    }
    Ok(())
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": { "type": "string" },
                "chunkIndex": { "type": "number" },
                "strategy": { "type": "string", "enum": ["smart", "fixed"] },
            },
            "required": ["prompt"],
        })
    }

    #[test]
    fn accepts_valid_arguments() {
        assert!(validate_arguments(&args(json!({"prompt": "hi", "strategy": "smart"})), &schema()).is_ok());
    }

    #[test]
    fn rejects_missing_required_field() {
        let err = validate_arguments(&args(json!({"chunkIndex": 1})), &schema()).unwrap_err();
        assert_eq!(err, "missing required field 'prompt'");
    }

    #[test]
    fn rejects_wrong_property_type() {
        let err = validate_arguments(&args(json!({"prompt": 3})), &schema()).unwrap_err();
        assert!(err.contains("expected type 'string', got number"));
    }

    #[test]
    fn rejects_value_outside_enum() {
        let err =
            validate_arguments(&args(json!({"prompt": "x", "strategy": "random"})), &schema()).unwrap_err();
        assert!(err.contains("unsupported value 'random'"));
    }

    #[test]
    fn ignores_undeclared_properties() {
        assert!(validate_arguments(&args(json!({"prompt": "x", "extra": [1]})), &schema()).is_ok());
    }
}
