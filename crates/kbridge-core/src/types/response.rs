//! Model response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured function-call payload emitted by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name; may be empty on malformed responses
    pub name: String,
    /// Call arguments
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// One content segment of a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// Plain text
    Text { text: String },
    /// Structured call request
    FunctionCall { function_call: FunctionCall },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Create a function call part
    pub fn function_call(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Part::FunctionCall {
            function_call: FunctionCall {
                name: name.into(),
                args,
            },
        }
    }

    /// Get the text if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::FunctionCall { .. } => None,
        }
    }

    /// Get the call if this is a function call part
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Part::FunctionCall { function_call } => Some(function_call),
            Part::Text { .. } => None,
        }
    }
}

/// One candidate output of the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Content segments, in order
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Candidate {
    /// Create a candidate from parts
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }
}

/// Full response of a model backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Candidate outputs; usually zero or one
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Aggregate text, when the backend exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ModelResponse {
    /// A response with no candidates
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-candidate text response
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            candidates: vec![Candidate::new(vec![Part::text(text.clone())])],
            text: Some(text),
        }
    }

    /// A single-candidate response from parts
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate::new(parts)],
            text: None,
        }
    }

    /// Text usable as a plain answer: aggregate text, else joined text parts of
    /// the first candidate
    pub fn usable_text(&self) -> Option<String> {
        if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
            return Some(text.to_string());
        }

        let texts: Vec<&str> = self
            .candidates
            .first()?
            .parts
            .iter()
            .filter_map(Part::as_text)
            .collect();

        let joined = texts.join("\n");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_text_prefers_aggregate() {
        let mut response = ModelResponse::from_parts(vec![Part::text("part")]);
        response.text = Some("aggregate".to_string());
        assert_eq!(response.usable_text().as_deref(), Some("aggregate"));
    }

    #[test]
    fn test_usable_text_blank_is_none() {
        assert_eq!(ModelResponse::empty().usable_text(), None);
        assert_eq!(ModelResponse::from_text("   ").usable_text(), None);
    }

    #[test]
    fn test_part_serialization() {
        let part = Part::text("Hello");
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains("\"type\":\"text\""));
    }
}
