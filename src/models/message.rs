use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::{MessageBody, effective_tag, normalize, repair};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Parses the record-level `type` tag; anything other than user/assistant is not a message
    pub fn from_record_type(record_type: &str) -> Option<Self> {
        match record_type {
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            _ => None,
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw content segment as the producer wrote it.
///
/// The shape drifts between producer versions, so the segment is kept as an open JSON object
/// and every field survives until the classifier decides what it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSegment(Map<String, Value>);

impl ContentSegment {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a `{"type": "text", "text": ...}` segment
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with("type", "text").with("text", text.into())
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

/// Message body as received: a plain string or an ordered list of segments, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Plain(String),
    Segments(Vec<ContentSegment>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub uuid: String,
    pub parent_uuid: Option<String>,
    pub timestamp: String,
    pub message_type: MessageRole,
    pub content: MessageContent,
    pub tool_use_id: Option<String>,
    pub cwd: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl ChatMessage {
    /// Repaired text of the message: the plain body, or every segment `text` joined by newlines
    pub fn display_text(&self) -> String {
        match &self.content {
            MessageContent::Plain(text) => repair(text),
            MessageContent::Segments(segments) => {
                let joined = segments
                    .iter()
                    .filter_map(|segment| segment.str_field("text"))
                    .collect::<Vec<_>>()
                    .join("\n");
                repair(&joined)
            }
        }
    }

    pub fn has_tool_invocations(&self) -> bool {
        self.segments().iter().any(|segment| effective_tag(segment) == "tool_use")
    }

    pub fn segments(&self) -> &[ContentSegment] {
        match &self.content {
            MessageContent::Plain(_) => &[],
            MessageContent::Segments(segments) => segments,
        }
    }

    /// Typed, display-ready body
    pub fn body(&self) -> MessageBody {
        normalize(&self.content)
    }
}
