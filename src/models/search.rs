use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Why a search hit matched. Declaration order is the canonical category order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Content,
    Thinking,
    ToolName,
    ToolInput,
    ToolResult,
    ToolStructuredResult,
}

impl MatchType {
    pub const ALL: [MatchType; 6] = [
        MatchType::Content,
        MatchType::Thinking,
        MatchType::ToolName,
        MatchType::ToolInput,
        MatchType::ToolResult,
        MatchType::ToolStructuredResult,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Content => "content",
            MatchType::Thinking => "thinking",
            MatchType::ToolName => "tool_name",
            MatchType::ToolInput => "tool_input",
            MatchType::ToolResult => "tool_result",
            MatchType::ToolStructuredResult => "tool_structured_result",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        MatchType::ALL
            .into_iter()
            .find(|match_type| match_type.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown match type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub session_id: String,
    pub message_uuid: String,
    pub snippet: String,
    pub match_type: MatchType,
}
