use serde::Serialize;
use serde_json::{Map, Value};

/// A tool call made by the assistant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInvocation {
    pub id: Option<String>,
    pub name: String,
    /// Passed through exactly as the producer wrote it
    pub input: Option<Value>,
}

/// What a tool returned, in up to two forms: free text and a structured side-channel payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolOutput {
    pub correlation_id: Option<String>,
    pub raw_text: Option<String>,
    pub structured_payload: Option<Value>,
}

/// A content segment after classification. Renderers switch on this and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedSegment {
    Text { body: String },
    ToolInvocation(ToolInvocation),
    ToolOutput(ToolOutput),
    ReasoningTrace { body: String },
    /// A segment whose type tag is missing or unknown; all original fields are kept for display
    Unrecognized { original_fields: Map<String, Value> },
}

impl ClassifiedSegment {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedSegment::Text { .. } => "text",
            ClassifiedSegment::ToolInvocation(_) => "tool_invocation",
            ClassifiedSegment::ToolOutput(_) => "tool_output",
            ClassifiedSegment::ReasoningTrace { .. } => "reasoning_trace",
            ClassifiedSegment::Unrecognized { .. } => "unrecognized",
        }
    }

    pub fn as_tool_output(&self) -> Option<&ToolOutput> {
        match self {
            ClassifiedSegment::ToolOutput(output) => Some(output),
            _ => None,
        }
    }
}
