use serde::Deserialize;
use serde_json::Value;

/// One line of a transcript JSONL file.
///
/// Files mix message records (`user`, `assistant`) with bookkeeping records (`summary`,
/// `system`, `file-history-snapshot`, ...), so every field is optional and unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    #[serde(default, rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub parent_uuid: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_session_id")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub message: Option<RecordMessage>,
    #[serde(default)]
    pub tool_use_result: Option<Value>,
    /// Set on `summary` records
    #[serde(default)]
    pub summary: Option<String>,
    /// Set on `summary` records: the uuid of the last message the summary covers
    #[serde(default)]
    pub leaf_uuid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordMessage {
    /// A string or an array of segments
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl TranscriptRecord {
    pub fn is_summary(&self) -> bool {
        self.record_type == "summary"
    }
}
