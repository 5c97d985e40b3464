//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

pub const SESSION_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const OTHER_SESSION_ID: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

/// Builder for creating test .claude directory structures
pub struct ClaudeDirBuilder {
    temp_dir: TempDir,
}

impl ClaudeDirBuilder {
    /// Create a new builder with an empty .claude directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the .claude directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a project directory with the given encoded name and session files
    pub fn with_project(self, encoded_name: &str, sessions: &[SessionFileBuilder]) -> Self {
        let project_dir = self.temp_dir.path().join("projects").join(encoded_name);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        for session in sessions {
            session.create_in(&project_dir);
        }

        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ClaudeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one session transcript file
///
/// Records get increasing timestamps (one minute apart) on the configured day.
#[derive(Clone)]
pub struct SessionFileBuilder {
    file_name: String,
    session_id: String,
    cwd: String,
    day: u32,
    lines: Vec<String>,
}

impl SessionFileBuilder {
    /// Session stored as `<session_id>.jsonl`
    pub fn new(session_id: &str) -> Self {
        Self {
            file_name: format!("{}.jsonl", session_id),
            session_id: session_id.to_string(),
            cwd: "/Users/test/project".to_string(),
            day: 1,
            lines: Vec::new(),
        }
    }

    pub fn file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = cwd.to_string();
        self
    }

    /// Day of January 2025 the records are timestamped on
    pub fn day(mut self, day: u32) -> Self {
        self.day = day;
        self
    }

    fn timestamp(&self) -> String {
        format!("2025-01-{:02}T10:{:02}:00Z", self.day, self.lines.len() % 60)
    }

    fn record(&self, kind: &str, uuid: &str, message: Value) -> Value {
        json!({
            "type": kind,
            "uuid": uuid,
            "sessionId": self.session_id,
            "timestamp": self.timestamp(),
            "cwd": self.cwd,
            "version": "1.0.0",
            "message": message
        })
    }

    /// User record; `content` may be a string or a segment array
    pub fn user(mut self, uuid: &str, content: Value) -> Self {
        let record = self.record("user", uuid, json!({"role": "user", "content": content}));
        self.lines.push(record.to_string());
        self
    }

    pub fn assistant(mut self, uuid: &str, message_id: &str, content: Value) -> Self {
        let record = self.record(
            "assistant",
            uuid,
            json!({"id": message_id, "role": "assistant", "model": "claude-test", "content": content}),
        );
        self.lines.push(record.to_string());
        self
    }

    /// User record carrying one tool result, with an optional structured payload
    pub fn tool_result(mut self, uuid: &str, tool_use_id: &str, text: &str, structured: Option<Value>) -> Self {
        let mut record = self.record(
            "user",
            uuid,
            json!({"role": "user", "content": [
                {"type": "tool_result", "tool_use_id": tool_use_id, "content": text}
            ]}),
        );
        if let Some(structured) = structured {
            record["toolUseResult"] = structured;
        }
        self.lines.push(record.to_string());
        self
    }

    pub fn summary(mut self, leaf_uuid: &str, summary: &str) -> Self {
        self.lines.push(json!({"type": "summary", "summary": summary, "leafUuid": leaf_uuid}).to_string());
        self
    }

    /// Append a line verbatim
    pub fn raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn to_jsonl(&self) -> String {
        self.lines.join("\n")
    }

    pub fn create_in(&self, dir: &Path) {
        fs::write(dir.join(&self.file_name), self.to_jsonl()).expect("Failed to write session file");
    }
}

/// A session with a short question/answer exchange.
///
/// Record uuids are `<session_id>-u1` and `<session_id>-a1`.
pub fn simple_session(session_id: &str, question: &str, answer: &str) -> SessionFileBuilder {
    SessionFileBuilder::new(session_id)
        .user(&format!("{}-u1", session_id), json!(question))
        .assistant(&format!("{}-a1", session_id), "msg_1", json!([{"type": "text", "text": answer}]))
}

/// A session where the assistant updates its task list through a todo tool
pub fn todo_session(session_id: &str) -> SessionFileBuilder {
    SessionFileBuilder::new(session_id)
        .user("u1", json!("Plan the release"))
        .assistant(
            "a1",
            "msg_1",
            json!([
                {"type": "thinking", "thinking": "I should track the release steps"},
                {"type": "tool_use", "id": "toolu_1", "name": "TodoWrite",
                 "input": {"todos": [{"content": "Write changelog", "status": "in_progress"}]}}
            ]),
        )
        .tool_result(
            "u2",
            "toolu_1",
            "Todos have been modified successfully. Ensure that you continue to use the todo list",
            Some(json!({
                "oldTodos": [],
                "newTodos": [
                    {"content": "Write changelog", "status": "in_progress", "activeForm": "Writing changelog"},
                    {"content": "Tag release", "status": "pending", "activeForm": "Tagging release"}
                ]
            })),
        )
}
