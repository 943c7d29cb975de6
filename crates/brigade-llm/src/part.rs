//! Tagged view over raw content parts.

use crate::wire::Part;
use brigade_protocol::ToolCallRequest;

/// One piece of a model response, classified by payload kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    /// Answer text.
    Text(String),
    /// Model reasoning, never shown to the operator.
    Thought(String),
    /// Pending local function call.
    FunctionCall(ToolCallRequest),
    /// Code the model wrote for its sandbox.
    ExecutableCode { language: Option<String>, code: String },
    /// Output of sandboxed code.
    CodeExecutionResult { outcome: Option<String>, output: String },
    /// Binary payload such as a generated image.
    InlineData { mime_type: String },
    /// Part with no payload this crate understands.
    Unknown,
}

impl ContentPart {
    pub(crate) fn from_part(part: &Part) -> Self {
        if let Some(call) = &part.function_call {
            return ContentPart::FunctionCall(ToolCallRequest::new(
                call.name.clone(),
                call.args.clone(),
            ));
        }
        if let Some(code) = &part.executable_code {
            return ContentPart::ExecutableCode {
                language: code.language.clone(),
                code: code.code.clone(),
            };
        }
        if let Some(result) = &part.code_execution_result {
            return ContentPart::CodeExecutionResult {
                outcome: result.outcome.clone(),
                output: result.output.clone(),
            };
        }
        if let Some(data) = &part.inline_data {
            return ContentPart::InlineData {
                mime_type: data.mime_type.clone(),
            };
        }
        match (&part.text, part.thought) {
            (Some(text), Some(true)) => ContentPart::Thought(text.clone()),
            (Some(text), _) => ContentPart::Text(text.clone()),
            (None, _) => ContentPart::Unknown,
        }
    }
}
