//! Core types shared by the bridge and the knowledge server

mod response;
mod tool;

pub use response::{Candidate, FunctionCall, ModelResponse, Part};
pub use tool::{ContentBlock, ToolCall, ToolDeclaration, ToolDescriptor, ToolOutput};
