//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool as published by an MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, unique within one listing
    pub name: String,
    /// Description of what the tool does
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    /// Create a new tool descriptor without a schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

impl From<rmcp::model::Tool> for ToolDescriptor {
    fn from(tool: rmcp::model::Tool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
            // input_schema is Arc<JsonObject>
            input_schema: Some(Value::Object(tool.input_schema.as_ref().clone())),
        }
    }
}

/// Model-facing projection of a [`ToolDescriptor`]
///
/// `parameters` has already been cleaned of schema keys the model backend rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    /// Function name
    pub name: String,
    /// Function description
    pub description: String,
    /// Parameter schema
    pub parameters: Value,
}

/// Tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool being called
    pub name: String,
    /// Input arguments for the tool
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Create a tool call from a JSON value; non-object values yield no arguments
    pub fn from_value(name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(name, arguments)
    }

    /// Get an input argument as a string
    pub fn get_arg_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

/// One block of tool output content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Textual content
    Text { text: String },
    /// Anything without a text representation (images, resources, ...)
    Other { value: Value },
}

impl ContentBlock {
    /// Create a text block
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Text representation of the block, if it has one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other { .. } => None,
        }
    }
}

/// Raw result of a tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
    /// A bare value with no block structure
    Value(Value),
}

impl ToolOutput {
    /// A single text block
    pub fn text(text: impl Into<String>) -> Self {
        ToolOutput::Blocks(vec![ContentBlock::text(text)])
    }
}

impl From<rmcp::model::CallToolResult> for ToolOutput {
    fn from(result: rmcp::model::CallToolResult) -> Self {
        use rmcp::model::RawContent;

        if result.content.is_empty() {
            if let Some(structured) = result.structured_content {
                return ToolOutput::Value(structured);
            }
        }

        // Content is Annotated<RawContent>, .raw holds the payload
        let blocks = result
            .content
            .into_iter()
            .map(|c| match c.raw {
                RawContent::Text(t) => ContentBlock::Text { text: t.text },
                other => ContentBlock::Other {
                    value: serde_json::to_value(&other).unwrap_or(Value::Null),
                },
            })
            .collect();

        ToolOutput::Blocks(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_creation() {
        let tool = ToolDescriptor::new("get_knowledge_base", "Search the knowledge base")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"]
            }));

        assert_eq!(tool.name, "get_knowledge_base");
        assert!(tool.input_schema.is_some());
    }

    #[test]
    fn test_tool_call_from_value() {
        let call = ToolCall::from_value("get_knowledge_base", json!({ "query": "dress code" }));
        assert_eq!(call.get_arg_str("query"), Some("dress code"));
        assert_eq!(call.get_arg_str("missing"), None);

        let call = ToolCall::from_value("get_knowledge_base", json!("not an object"));
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_content_block_text() {
        assert_eq!(ContentBlock::text("hi").as_text(), Some("hi"));
        let other = ContentBlock::Other { value: json!({ "uri": "file:///x" }) };
        assert_eq!(other.as_text(), None);
    }

    #[test]
    fn test_call_tool_result_conversion() {
        let result = rmcp::model::CallToolResult::success(vec![rmcp::model::Content::text("hello")]);
        let output = ToolOutput::from(result);
        assert_eq!(output, ToolOutput::text("hello"));
    }
}
