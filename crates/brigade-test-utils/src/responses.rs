//! Builders for canned provider responses.

use brigade_llm::wire::{
    CodeExecutionResult, ExecutableCode, GroundingChunk, WebChunk,
};
use brigade_llm::{Candidate, Content, GenerateContentResponse, GroundingMetadata, Part};
use serde_json::{Map, Value};

/// Response whose first candidate carries `parts`.
pub fn response_with_parts(parts: Vec<Part>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content::model(parts)),
            finish_reason: Some("STOP".to_string()),
            grounding_metadata: None,
        }],
        ..GenerateContentResponse::default()
    }
}

/// Plain text answer.
pub fn text_response(text: &str) -> GenerateContentResponse {
    response_with_parts(vec![Part::text(text)])
}

/// Response requesting each `(name, args)` call in order. `args` must be a
/// JSON object; anything else becomes empty arguments.
pub fn function_call_response(calls: &[(&str, Value)]) -> GenerateContentResponse {
    let parts = calls
        .iter()
        .map(|(name, args)| Part::function_call(*name, as_map(args)))
        .collect();
    response_with_parts(parts)
}

/// Text answer with web grounding chunks given as `(title, uri)`; `None`
/// leaves the field out.
pub fn grounded_response(
    text: &str,
    sources: &[(Option<&str>, Option<&str>)],
) -> GenerateContentResponse {
    let mut response = text_response(text);
    let chunks = sources
        .iter()
        .map(|(title, uri)| GroundingChunk {
            web: Some(WebChunk {
                title: title.map(str::to_string),
                uri: uri.map(str::to_string),
            }),
        })
        .collect();
    if let Some(candidate) = response.candidates.first_mut() {
        candidate.grounding_metadata = Some(GroundingMetadata {
            grounding_chunks: chunks,
            web_search_queries: Vec::new(),
        });
    }
    response
}

/// Executable code part.
pub fn code_part(code: &str) -> Part {
    Part {
        executable_code: Some(ExecutableCode {
            language: Some("PYTHON".to_string()),
            code: code.to_string(),
        }),
        ..Part::default()
    }
}

/// Code execution result part.
pub fn code_result_part(output: &str) -> Part {
    Part {
        code_execution_result: Some(CodeExecutionResult {
            outcome: Some("OUTCOME_OK".to_string()),
            output: output.to_string(),
        }),
        ..Part::default()
    }
}

fn as_map(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
