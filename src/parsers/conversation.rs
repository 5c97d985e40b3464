use std::mem;
use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use super::jsonl::for_each_record;
use crate::content::effective_tag;
use crate::models::{ChatMessage, ContentSegment, MessageContent, MessageRole, TranscriptRecord};

const TOOL_RESULT_TAG: &str = "tool_result";

/// Parse a session transcript into display messages.
///
/// Only `user` and `assistant` records become messages. Two merges keep a single assistant
/// turn together:
/// - consecutive assistant records that share a producer message id are concatenated;
/// - tool results sent back by the user right after an assistant turn that invoked tools are
///   appended to that assistant message (any other content of the user record stays a
///   separate user message).
///
/// Line-level failures are handled by [`for_each_record`].
pub fn parse_session_messages(path: &Path, max_file_bytes: u64) -> Result<Vec<ChatMessage>> {
    let mut messages = Vec::new();

    for_each_record(path, max_file_bytes, |record| {
        if record.is_summary() {
            return;
        }
        if let Some(message) = record_to_message(&record) {
            let message_id = record.message.as_ref().and_then(|m| m.id.as_deref());
            push_message(&mut messages, message, message_id);
        }
    })?;

    Ok(messages)
}

/// Converts a message record into a [`ChatMessage`].
///
/// Returns `None` for non-message records and for message records missing their uuid,
/// timestamp or message body. The message uuid is `"<uuid>#<message id>"` when the producer
/// supplies a message id, so records of one assistant turn can be recognized later.
pub fn record_to_message(record: &TranscriptRecord) -> Option<ChatMessage> {
    let role = MessageRole::from_record_type(&record.record_type)?;
    let uuid = record.uuid.as_deref()?;
    let timestamp = record.timestamp.clone()?;
    let message = record.message.as_ref()?;

    let mut content = content_from_value(&message.content);

    // The structured tool result travels on the record, not on the segment
    if role == MessageRole::User
        && let Some(result) = &record.tool_use_result
        && let MessageContent::Segments(segments) = &mut content
    {
        for segment in segments.iter_mut().filter(|s| effective_tag(s) == TOOL_RESULT_TAG) {
            segment.insert("tool_use_result", result.clone());
        }
    }

    let tool_use_id = match &content {
        MessageContent::Segments(segments) => segments
            .iter()
            .filter(|s| effective_tag(s) == TOOL_RESULT_TAG)
            .find_map(|s| s.str_field("tool_use_id"))
            .map(str::to_string),
        MessageContent::Plain(_) => None,
    };

    let uuid = match &message.id {
        Some(message_id) => format!("{}#{}", uuid, message_id),
        None => uuid.to_string(),
    };

    Some(ChatMessage {
        uuid,
        parent_uuid: record.parent_uuid.clone(),
        timestamp,
        message_type: role,
        content,
        tool_use_id,
        cwd: record.cwd.clone(),
        version: record.version.clone(),
        model: message.model.clone(),
    })
}

/// A string becomes plain content; an array becomes segments. Array items that are not objects
/// are wrapped rather than dropped: strings as text segments, anything else under `value`.
pub fn content_from_value(value: &Value) -> MessageContent {
    match value {
        Value::String(text) => MessageContent::Plain(text.clone()),
        Value::Array(items) => MessageContent::Segments(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(fields) => ContentSegment::from_fields(fields.clone()),
                    Value::String(text) => ContentSegment::text(text.clone()),
                    other => ContentSegment::new().with("value", other.clone()),
                })
                .collect(),
        ),
        Value::Null => MessageContent::Plain(String::new()),
        other => MessageContent::Plain(other.to_string()),
    }
}

fn push_message(messages: &mut Vec<ChatMessage>, mut message: ChatMessage, message_id: Option<&str>) {
    if let Some(message_id) = message_id
        && let Some(previous) = messages.last_mut()
        && previous.message_type == MessageRole::Assistant
        && message.message_type == MessageRole::Assistant
        && previous.uuid.ends_with(message_id)
    {
        append_content(&mut previous.content, message.content);
        return;
    }

    if message.message_type == MessageRole::User
        && let Some(previous) = messages.last_mut()
        && previous.message_type == MessageRole::Assistant
        && previous.has_tool_invocations()
        && let MessageContent::Segments(segments) = &mut message.content
        && segments.iter().any(|s| effective_tag(s) == TOOL_RESULT_TAG)
    {
        let (results, rest): (Vec<_>, Vec<_>) =
            mem::take(segments).into_iter().partition(|s| effective_tag(s) == TOOL_RESULT_TAG);
        append_content(&mut previous.content, MessageContent::Segments(results));
        if rest.is_empty() {
            return;
        }
        *segments = rest;
    }

    messages.push(message);
}

fn append_content(target: &mut MessageContent, extra: MessageContent) {
    let mut segments = into_segments(mem::replace(target, MessageContent::Segments(Vec::new())));
    segments.extend(into_segments(extra));
    *target = MessageContent::Segments(segments);
}

fn into_segments(content: MessageContent) -> Vec<ContentSegment> {
    match content {
        MessageContent::Plain(text) => vec![ContentSegment::text(text)],
        MessageContent::Segments(segments) => segments,
    }
}
