use serde_json::Value;

use crate::models::{ClassifiedSegment, ContentSegment, ToolInvocation, ToolOutput};

/// Field names that may carry a segment's type tag, current name first
pub const TYPE_TAG_FIELDS: &[&str] = &["type", "block_type"];

/// Tag used when no type field is present
pub const UNKNOWN_TAG: &str = "unknown";

/// Resolves the type tag of a raw segment.
///
/// The first field in [`TYPE_TAG_FIELDS`] holding a non-empty string wins; a segment with none
/// of them is tagged [`UNKNOWN_TAG`].
pub fn effective_tag(raw: &ContentSegment) -> &str {
    TYPE_TAG_FIELDS
        .iter()
        .filter_map(|field| raw.str_field(field))
        .find(|tag| !tag.is_empty())
        .unwrap_or(UNKNOWN_TAG)
}

/// Classifies a raw segment into one of the [`ClassifiedSegment`] variants.
///
/// Total: a segment with an unknown or missing tag becomes
/// [`ClassifiedSegment::Unrecognized`] carrying all of its fields.
pub fn classify(raw: &ContentSegment) -> ClassifiedSegment {
    match effective_tag(raw) {
        "text" => ClassifiedSegment::Text { body: owned_str(raw, "text") },
        "tool_use" => ClassifiedSegment::ToolInvocation(ToolInvocation {
            id: raw.str_field("id").map(str::to_string),
            name: owned_str(raw, "name"),
            input: raw.field("input").cloned(),
        }),
        "tool_result" => ClassifiedSegment::ToolOutput(ToolOutput {
            correlation_id: raw.str_field("tool_use_id").map(str::to_string),
            raw_text: raw.field("content").and_then(tool_result_text),
            structured_payload: raw.field("tool_use_result").filter(|v| !v.is_null()).cloned(),
        }),
        "thinking" => ClassifiedSegment::ReasoningTrace { body: owned_str(raw, "thinking") },
        _ => ClassifiedSegment::Unrecognized { original_fields: raw.fields().clone() },
    }
}

fn owned_str(raw: &ContentSegment, key: &str) -> String {
    raw.str_field(key).unwrap_or_default().to_string()
}

/// Tool result text is a string, or a list of `{"type":"text","text":...}` items
pub(crate) fn tool_result_text(content: &Value) -> Option<String> {
    match content {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> =
                items.iter().filter_map(|item| item.get("text").and_then(Value::as_str)).collect();
            if parts.is_empty() { None } else { Some(parts.join("\n")) }
        }
        _ => None,
    }
}
