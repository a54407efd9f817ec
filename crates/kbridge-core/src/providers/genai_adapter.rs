//! Adapter between kbridge types and genai types
//!
//! genai speaks every provider's wire format; this module only translates our
//! request/response shapes. Auth never goes through genai's env var lookup: the
//! key resolved from our `SecretStore` is handed over explicitly.

use std::future::Future;
use std::pin::Pin;

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatRequest, ChatResponse,
    MessageContent, Tool as GenaiTool, ToolCall as GenaiToolCall,
};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};
use serde_json::Value;

use crate::types::{Candidate, ModelResponse, Part, ToolDeclaration};

use super::traits::GenerateRequest;

// ============================================================================
// Request Conversion: kbridge -> genai
// ============================================================================

/// Convert a tool declaration to a genai tool
pub fn to_genai_tool(tool: &ToolDeclaration) -> GenaiTool {
    GenaiTool::new(&tool.name)
        .with_description(&tool.description)
        .with_schema(tool.parameters.clone())
}

/// Build the genai chat request: one user turn plus the declared tools
///
/// No function-calling mode is sent. Gemini runs in AUTO mode whenever tools
/// are declared, so the model chooses between a call and a text answer.
pub fn to_genai_request(request: &GenerateRequest) -> ChatRequest {
    let mut chat_req = ChatRequest::new(vec![GenaiMessage::user(request.prompt.clone())]);

    if !request.tools.is_empty() {
        chat_req = chat_req.with_tools(request.tools.iter().map(to_genai_tool).collect::<Vec<_>>());
    }

    chat_req
}

/// Convert generation settings to genai options
pub fn to_genai_options(request: &GenerateRequest) -> GenaiOptions {
    let mut options = GenaiOptions::default().with_temperature(request.temperature as f64);

    if let Some(max_tokens) = request.max_output_tokens {
        options = options.with_max_tokens(max_tokens);
    }

    options
}

// ============================================================================
// Response Conversion: genai -> kbridge
// ============================================================================

/// Convert a genai tool call to a function call part
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> Part {
    let args = match &tc.fn_arguments {
        Value::Object(map) => map.clone(),
        _ => Default::default(),
    };
    Part::function_call(tc.fn_name.clone(), args)
}

/// Convert a genai chat response to a single-candidate model response
pub fn from_genai_response(response: &ChatResponse) -> ModelResponse {
    from_genai_content(&response.content)
}

/// Convert assistant message content to a single-candidate model response
///
/// Function calls are placed before text parts, the order Gemini emits them in.
/// Content with neither becomes one empty candidate, which interprets as "no
/// meaningful response" rather than "no candidates".
pub fn from_genai_content(content: &MessageContent) -> ModelResponse {
    let mut parts: Vec<Part> = content
        .tool_calls()
        .into_iter()
        .map(from_genai_tool_call)
        .collect();

    let texts: Vec<&str> = content.texts();
    parts.extend(texts.iter().map(|t| Part::text(*t)));

    let aggregate = texts.join("");
    ModelResponse {
        candidates: vec![Candidate::new(parts)],
        text: (!aggregate.is_empty()).then_some(aggregate),
    }
}

// ============================================================================
// Provider Resolution
// ============================================================================

/// Provider name used for credential lookup, derived from the model id
pub fn provider_for_model(model: &str) -> &'static str {
    let model = model.to_lowercase();
    if let Some((prefix, _)) = model.split_once('/') {
        return match prefix {
            "openai" => "openai",
            "anthropic" => "anthropic",
            "groq" => "groq",
            "ollama" => "ollama",
            _ => "gemini",
        };
    }

    if model.starts_with("gpt") || model.starts_with("o1") || model.starts_with("o3") {
        "openai"
    } else if model.starts_with("claude") {
        "anthropic"
    } else {
        "gemini"
    }
}

/// Strip an optional `provider/` prefix
pub fn model_name(model: &str) -> &str {
    model.split_once('/').map(|(_, name)| name).unwrap_or(model)
}

/// Create a genai client that authenticates with the given key
pub fn create_client(api_key: Option<String>) -> Client {
    let auth_resolver = AuthResolver::from_resolver_async_fn(
        move |_model_iden: ModelIden| -> Pin<Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>> {
            let key = api_key.clone();
            Box::pin(async move { Ok(key.map(AuthData::from_single)) })
        },
    );

    Client::builder().with_auth_resolver(auth_resolver).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::interpreter::NO_MEANINGFUL_RESPONSE;
    use crate::tools::{interpret, Interpretation};
    use genai::chat::ContentPart;
    use serde_json::json;

    fn declaration() -> ToolDeclaration {
        ToolDeclaration {
            name: "get_knowledge_base".to_string(),
            description: "Search the knowledge base".to_string(),
            parameters: json!({
                "type": "object",
                "properties": { "query": { "type": "string" } }
            }),
        }
    }

    fn genai_call(name: &str, args: Value) -> GenaiToolCall {
        serde_json::from_value(json!({
            "call_id": "call-1",
            "fn_name": name,
            "fn_arguments": args
        }))
        .unwrap()
    }

    #[test]
    fn test_tool_conversion() {
        let genai_tool = to_genai_tool(&declaration());
        assert_eq!(genai_tool.name, "get_knowledge_base");
    }

    #[test]
    fn test_request_declares_tools_only_when_present() {
        let request = GenerateRequest::new("gemini-1.5-flash", "What is the dress code?")
            .with_tools(vec![declaration()]);
        let chat_req = to_genai_request(&request);
        let tools = chat_req.tools.unwrap_or_default();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "get_knowledge_base");
        assert_eq!(chat_req.messages.len(), 1);

        let chat_req = to_genai_request(&GenerateRequest::new("gemini-1.5-flash", "hi"));
        assert!(chat_req.tools.is_none());
    }

    #[test]
    fn test_content_with_call_and_text() {
        let content = MessageContent::from_parts(vec![
            ContentPart::Text("Let me look that up.".to_string()),
            ContentPart::ToolCall(genai_call("get_knowledge_base", json!({ "query": "dress code" }))),
        ]);

        let response = from_genai_content(&content);
        assert_eq!(response.candidates.len(), 1);
        // Call comes first even though the text was emitted before it
        assert!(response.candidates[0].parts[0].as_function_call().is_some());
        assert_eq!(response.text.as_deref(), Some("Let me look that up."));

        match interpret(&response) {
            Interpretation::ToolCall(call) => {
                assert_eq!(call.name, "get_knowledge_base");
                assert_eq!(call.arguments.get("query"), Some(&json!("dress code")));
            }
            other => panic!("expected a tool call, got {:?}", other),
        }
    }

    #[test]
    fn test_content_with_text_only() {
        let content = MessageContent::from_parts(vec![ContentPart::Text("Hello there".to_string())]);

        let response = from_genai_content(&content);
        assert_eq!(
            interpret(&response),
            Interpretation::DirectText("Hello there".to_string())
        );
    }

    #[test]
    fn test_non_object_arguments_become_empty() {
        let part = from_genai_tool_call(&genai_call("ping", Value::Null));
        let call = part.as_function_call().unwrap();
        assert_eq!(call.name, "ping");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_empty_content_is_not_meaningful() {
        let response = from_genai_content(&MessageContent::from_parts(Vec::<ContentPart>::new()));
        assert_eq!(response.candidates.len(), 1);
        assert!(response.text.is_none());
        assert_eq!(
            interpret(&response),
            Interpretation::DirectText(NO_MEANINGFUL_RESPONSE.to_string())
        );
    }

    #[test]
    fn test_provider_for_model() {
        assert_eq!(provider_for_model("gemini-1.5-flash"), "gemini");
        assert_eq!(provider_for_model("gpt-4o"), "openai");
        assert_eq!(provider_for_model("claude-3-5-sonnet"), "anthropic");
        assert_eq!(provider_for_model("ollama/llama3"), "ollama");
    }

    #[test]
    fn test_model_name() {
        assert_eq!(model_name("ollama/llama3"), "llama3");
        assert_eq!(model_name("gemini-1.5-flash"), "gemini-1.5-flash");
    }
}
