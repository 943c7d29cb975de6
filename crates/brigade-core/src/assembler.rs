//! Folds one model response into a display-ready assistant message.

use brigade_llm::{ContentPart, GenerateContentResponse};
use brigade_protocol::{CodeExecutionRecord, GroundingSource, Message};
use log::debug;

/// Badge recorded when the model ran code.
pub const CODE_EXECUTION_BADGE: &str = "code_execution";
/// Badge recorded when the answer is grounded in web search.
pub const SEARCH_BADGE: &str = "google_search";
/// Title used for a citation without one.
pub const DEFAULT_SOURCE_TITLE: &str = "Source";
/// URI used for a citation without one.
pub const PLACEHOLDER_SOURCE_URI: &str = "#";
/// Shown when the model produced nothing displayable.
pub const EMPTY_RESPONSE_TEXT: &str =
    "I couldn't come up with an answer to that. Could you rephrase the question?";

#[derive(Debug, Default)]
struct Fold {
    text: String,
    code: Option<CodeExecutionRecord>,
    unanswered_calls: usize,
}

impl Fold {
    fn step(mut self, part: ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => self.text.push_str(&text),
            ContentPart::ExecutableCode { code, .. } => {
                append_block(&mut self.code.get_or_insert_with(Default::default).code, &code)
            }
            ContentPart::CodeExecutionResult { output, .. } => append_block(
                &mut self.code.get_or_insert_with(Default::default).output,
                &output,
            ),
            ContentPart::FunctionCall(_) => self.unanswered_calls += 1,
            ContentPart::Thought(_) | ContentPart::InlineData { .. } | ContentPart::Unknown => {}
        }
        self
    }
}

fn append_block(target: &mut String, block: &str) {
    if block.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push_str("\n\n");
    }
    target.push_str(block);
}

/// Build the assistant message for a finished turn.
///
/// `tool_invocations` lists every tool the loop dispatched, in order. The
/// message keeps that full log and derives `tools_used` from it: first-seen
/// order, one badge per name, plus the code execution and search badges at
/// most once each.
pub fn assemble_message(response: &GenerateContentResponse, tool_invocations: &[String]) -> Message {
    let fold = response
        .content_parts()
        .into_iter()
        .fold(Fold::default(), Fold::step);
    if fold.unanswered_calls > 0 {
        debug!(
            "assembling response with unanswered function calls (count={})",
            fold.unanswered_calls
        );
    }

    let mut tools_used: Vec<String> = Vec::new();
    let mut badge = |name: &str| {
        if !tools_used.iter().any(|existing| existing == name) {
            tools_used.push(name.to_string());
        }
    };
    for name in tool_invocations {
        badge(name);
    }
    if fold.code.is_some() {
        badge(CODE_EXECUTION_BADGE);
    }

    let sources = response
        .grounding()
        .map(|grounding| {
            grounding
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .map(|web| GroundingSource {
                    title: web
                        .title
                        .clone()
                        .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string()),
                    uri: web
                        .uri
                        .clone()
                        .unwrap_or_else(|| PLACEHOLDER_SOURCE_URI.to_string()),
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if !sources.is_empty() {
        badge(SEARCH_BADGE);
    }

    let text = if fold.text.trim().is_empty() && fold.code.is_none() {
        EMPTY_RESPONSE_TEXT.to_string()
    } else {
        fold.text
    };

    let mut message = Message::assistant(text);
    message.tools_used = tools_used;
    message.tool_invocations = tool_invocations.to_vec();
    message.code_execution = fold.code;
    message.sources = sources;
    message
}
