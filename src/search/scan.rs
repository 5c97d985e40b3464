use std::path::Path;

use anyhow::Result;

use super::snippet::create_snippet;
use crate::content::classifier::tool_result_text;
use crate::models::{MatchType, MessageContent, SearchResult};
use crate::parsers::{for_each_record, record_to_message};

/// Searches one transcript file for `query_lower` (already lowercased).
///
/// Every message record is checked field by field, so one record can produce several results,
/// one per matching field. Results are in file order. The session id is the first `sessionId`
/// seen in the file, or the file stem when no record carries one.
pub fn search_session_file(
    path: &Path,
    query_lower: &str,
    context_chars: usize,
    max_file_bytes: u64,
) -> Result<Vec<SearchResult>> {
    let mut session_id = None;
    let mut hits = Vec::new();

    for_each_record(path, max_file_bytes, |record| {
        if record.is_summary() {
            return;
        }
        if session_id.is_none() {
            session_id = record.session_id.clone();
        }
        let (Some(uuid), Some(message)) = (record.uuid.as_deref(), record_to_message(&record))
        else {
            return;
        };
        for (match_type, snippet) in match_content(&message.content, query_lower, context_chars) {
            hits.push((uuid.to_string(), match_type, snippet));
        }
    })?;

    let session_id = session_id
        .or_else(|| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_default();

    Ok(hits
        .into_iter()
        .map(|(message_uuid, match_type, snippet)| SearchResult {
            session_id: session_id.clone(),
            message_uuid,
            snippet,
            match_type,
        })
        .collect())
}

/// Matching fields of one message body as `(category, snippet)` pairs
pub fn match_content(
    content: &MessageContent,
    query_lower: &str,
    context_chars: usize,
) -> Vec<(MatchType, String)> {
    let mut matches = Vec::new();
    let mut check = |text: &str, match_type: MatchType| {
        if !text.to_lowercase().contains(query_lower) {
            return;
        }
        let snippet = match match_type {
            MatchType::ToolName => format!("Tool: {}", text),
            _ => create_snippet(text, query_lower, context_chars),
        };
        matches.push((match_type, snippet));
    };

    match content {
        MessageContent::Plain(text) => check(text, MatchType::Content),
        MessageContent::Segments(segments) => {
            for segment in segments {
                if let Some(text) = segment.str_field("text") {
                    check(text, MatchType::Content);
                }
                if let Some(thinking) = segment.str_field("thinking") {
                    check(thinking, MatchType::Thinking);
                }
                if let Some(name) = segment.str_field("name") {
                    check(name, MatchType::ToolName);
                }
                if let Some(input) = segment.field("input").filter(|v| !v.is_null()) {
                    check(&input.to_string(), MatchType::ToolInput);
                }
                if let Some(output) = segment.field("content").and_then(tool_result_text) {
                    check(&output, MatchType::ToolResult);
                }
                if let Some(result) = segment.field("tool_use_result").filter(|v| !v.is_null()) {
                    check(&result.to_string(), MatchType::ToolStructuredResult);
                }
            }
        }
    }

    matches
}
