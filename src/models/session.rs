use serde::{Deserialize, Serialize};

/// One transcript file as listed in the project tree.
///
/// Timestamps are kept as RFC 3339 strings exactly as the producer wrote them (after
/// normalization of epoch-millisecond values), so ordering by `last_updated` is lexical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub project_path: String,
    pub message_count: usize,
    pub last_updated: String,
}

/// A project directory and the sessions recorded in it, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFolder {
    pub name: String,
    pub path: String,
    pub chat_sessions: Vec<ChatSession>,
}

impl ProjectFolder {
    /// Most recent `last_updated` across the project's sessions
    pub fn latest_activity(&self) -> Option<&str> {
        self.chat_sessions.iter().map(|s| s.last_updated.as_str()).max()
    }

    pub fn message_count(&self) -> usize {
        self.chat_sessions.iter().map(|s| s.message_count).sum()
    }
}
