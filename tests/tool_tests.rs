//! Tests for the tool system.

use std::sync::Arc;

use serde_json::json;

use poe_bridge::error::BridgeError;
use poe_bridge::tools::builtin::{builtin_registry, ping_tool};
use poe_bridge::tools::validation::validate_arguments;
use poe_bridge::tools::*;

fn search_tool() -> Arc<dyn Tool> {
    Arc::new(FnTool::new(
        "search",
        "Search the docs",
        ToolParameters::object()
            .string("query", "Search query", true)
            .number("limit", "Max results", false)
            .string_enum("format", "Output format", &["json", "text"], false)
            .build(),
        |args| async move {
            let limit = args.get_i64("limit").unwrap_or(10);
            Ok(format!("{} (limit {limit})", args.get_str("query")?))
        },
    ))
}

#[test]
fn parameter_builder_constructs_schema() {
    let params = ToolParameters::object()
        .string("query", "Search query", true)
        .number("limit", "Max results", false)
        .boolean("verbose", "Enable verbose output", false)
        .build();

    let schema = &params.schema;
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["query"]["type"], "string");
    assert_eq!(schema["properties"]["limit"]["type"], "number");
    assert_eq!(schema["properties"]["verbose"]["type"], "boolean");
    assert_eq!(schema["required"], json!(["query"]));
}

#[test]
fn definition_serializes_for_the_wire() {
    let definition = search_tool().definition();
    let value = serde_json::to_value(&definition).unwrap();
    assert_eq!(value["name"], "search");
    assert_eq!(value["description"], "Search the docs");
    assert_eq!(value["parameters"]["properties"]["format"]["enum"], json!(["json", "text"]));
}

#[test]
fn validation_reports_first_violation() {
    let schema = search_tool().parameters().schema.clone();
    let args = |v: serde_json::Value| v.as_object().cloned().unwrap();

    assert!(validate_arguments(&args(json!({"query": "rust"})), &schema).is_ok());
    assert_eq!(
        validate_arguments(&args(json!({"limit": 3})), &schema).unwrap_err(),
        "missing required field 'query'"
    );
    assert!(validate_arguments(&args(json!({"query": 1})), &schema)
        .unwrap_err()
        .contains("expected type 'string'"));
    assert!(validate_arguments(&args(json!({"query": "x", "format": "xml"})), &schema)
        .unwrap_err()
        .contains("unsupported value 'xml'"));
}

#[test]
fn argument_parsing_rejects_non_objects() {
    assert!(ToolArguments::parse("").unwrap().as_map().is_empty());
    assert!(matches!(
        ToolArguments::parse("[1, 2]"),
        Err(ArgumentParseError::NotAnObject(_))
    ));
    assert!(matches!(
        ToolArguments::parse("{not json"),
        Err(ArgumentParseError::InvalidJson(_))
    ));
}

#[tokio::test]
async fn registry_validates_before_executing() {
    let registry = ToolRegistry::with_tools(vec![search_tool()]);

    let ok = registry
        .execute_tool("search", &ToolArguments::parse(r#"{"query":"borrowck","limit":2}"#).unwrap())
        .await
        .unwrap();
    assert_eq!(ok, "borrowck (limit 2)");

    let err = registry
        .execute_tool("search", &ToolArguments::parse(r#"{"limit":2}"#).unwrap())
        .await
        .unwrap_err();
    match err {
        BridgeError::ToolExecution { tool_name, message } => {
            assert_eq!(tool_name, "search");
            assert!(message.starts_with("Argument validation failed"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn registry_reports_unknown_tools() {
    let err = builtin_registry()
        .execute_tool("shell", &ToolArguments::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Tool 'shell' not found"));
}

#[test]
fn registering_same_name_replaces_in_place() {
    let mut registry = builtin_registry();
    registry.register(ping_tool());
    registry.register(search_tool());
    assert_eq!(registry.names(), vec!["ping", "help", "fetch-chunk", "search"]);
    assert_eq!(registry.len(), 4);
}
