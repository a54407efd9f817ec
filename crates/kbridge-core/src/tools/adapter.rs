//! Tool schema adaptation
//!
//! MCP servers describe tool inputs with full JSON Schema. Function-calling
//! backends reject a few of its keys, so every declaration goes through
//! `adapt` before it is sent to the model.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::logging::Logger;
use crate::types::{ToolDeclaration, ToolDescriptor};

/// Schema keys the model backend refuses
pub const RESERVED_KEYS: &[&str] = &["$schema", "additionalProperties"];

/// Keys whose value is a map of name -> schema
const SCHEMA_MAP_KEYS: &[&str] = &[
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

/// Keys whose value is a schema or a list of schemas
const SCHEMA_KEYS: &[&str] = &[
    "items",
    "prefixItems",
    "additionalItems",
    "unevaluatedItems",
    "unevaluatedProperties",
    "contains",
    "propertyNames",
    "anyOf",
    "oneOf",
    "allOf",
    "not",
    "if",
    "then",
    "else",
];

/// Why a single tool could not be adapted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdaptError {
    #[error("tool has an empty name")]
    EmptyName,

    #[error("input schema of {name} is not a JSON object")]
    SchemaNotObject { name: String },
}

/// Convert server tool descriptors into backend tool declarations
///
/// Tools that can't be adapted are logged and left out; the others are
/// returned in their original order.
pub fn adapt(descriptors: &[ToolDescriptor], logger: &dyn Logger) -> Vec<ToolDeclaration> {
    descriptors
        .iter()
        .filter_map(|descriptor| match adapt_one(descriptor) {
            Ok(declaration) => Some(declaration),
            Err(e) => {
                logger.warn(&format!("[ToolSchemaAdapter] Skipping tool: {}", e));
                None
            }
        })
        .collect()
}

/// Adapt a single descriptor
pub fn adapt_one(descriptor: &ToolDescriptor) -> Result<ToolDeclaration, AdaptError> {
    if descriptor.name.trim().is_empty() {
        return Err(AdaptError::EmptyName);
    }

    let parameters = match &descriptor.input_schema {
        None => json!({ "type": "object" }),
        Some(Value::Object(schema)) => Value::Object(strip_schema(schema)),
        Some(_) => {
            return Err(AdaptError::SchemaNotObject {
                name: descriptor.name.clone(),
            })
        }
    };

    Ok(ToolDeclaration {
        name: descriptor.name.clone(),
        description: descriptor.description.clone(),
        parameters,
    })
}

fn strip_schema(schema: &Map<String, Value>) -> Map<String, Value> {
    schema
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| {
            let value = if SCHEMA_MAP_KEYS.contains(&key.as_str()) {
                strip_schema_map(value)
            } else if SCHEMA_KEYS.contains(&key.as_str()) {
                strip_schema_value(value)
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}

// Property names are kept even when they collide with a reserved key
fn strip_schema_map(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(name, schema)| (name.clone(), strip_schema_value(schema)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn strip_schema_value(value: &Value) -> Value {
    match value {
        Value::Object(schema) => Value::Object(strip_schema(schema)),
        Value::Array(schemas) => Value::Array(schemas.iter().map(strip_schema_value).collect()),
        other => other.clone(),
    }
}
