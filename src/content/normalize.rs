use serde::Serialize;

use super::classifier::classify;
use super::repair::repair;
use crate::models::{ClassifiedSegment, MessageContent};

/// A message body ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum MessageBody {
    /// Repaired plain text
    Plain(String),
    Segments(Vec<ClassifiedSegment>),
}

impl MessageBody {
    pub fn segments(&self) -> &[ClassifiedSegment] {
        match self {
            MessageBody::Plain(_) => &[],
            MessageBody::Segments(segments) => segments,
        }
    }
}

/// Classifies every segment of `content` and repairs its display text
pub fn normalize(content: &MessageContent) -> MessageBody {
    match content {
        MessageContent::Plain(text) => MessageBody::Plain(repair(text)),
        MessageContent::Segments(raw) => MessageBody::Segments(
            raw.iter()
                .map(|segment| match classify(segment) {
                    ClassifiedSegment::Text { body } => ClassifiedSegment::Text { body: repair(&body) },
                    other => other,
                })
                .collect(),
        ),
    }
}
