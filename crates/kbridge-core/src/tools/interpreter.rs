//! Model response interpretation

use crate::types::{ModelResponse, Part, ToolCall};

/// Answer used when the backend returned no candidates at all
pub const NO_CANDIDATES: &str = "Error: No response candidates from Gemini";

/// Answer used when the response holds neither a call nor text
pub const NO_MEANINGFUL_RESPONSE: &str = "No meaningful response generated";

/// What the model asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// Answer the user with this text
    DirectText(String),
    /// Run this tool and answer with its output
    ToolCall(ToolCall),
}

/// Decide between a tool call and a direct answer
///
/// Only the first candidate is considered. A function call in its first part
/// wins over any text that comes with it.
pub fn interpret(response: &ModelResponse) -> Interpretation {
    let Some(candidate) = response.candidates.first() else {
        return Interpretation::DirectText(NO_CANDIDATES.to_string());
    };

    if let Some(call) = candidate.parts.first().and_then(Part::as_function_call) {
        if !call.name.is_empty() {
            return Interpretation::ToolCall(ToolCall::new(call.name.clone(), call.args.clone()));
        }
    }

    let texts: Vec<&str> = candidate.parts.iter().filter_map(Part::as_text).collect();
    if !texts.is_empty() {
        return Interpretation::DirectText(texts.join("\n"));
    }

    match response.text.as_deref() {
        Some(text) if !text.is_empty() => Interpretation::DirectText(text.to_string()),
        _ => Interpretation::DirectText(NO_MEANINGFUL_RESPONSE.to_string()),
    }
}
