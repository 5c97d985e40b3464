use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::warn;

use super::conversation::record_to_message;
use super::jsonl::for_each_record;
use crate::content::repair;
use crate::models::{ChatSession, MessageRole};
use crate::utils::validate_path_not_symlink;

const UNTITLED: &str = "Untitled Chat";
const MAX_TITLE_CHARS: usize = 50;
const TRUNCATED_TITLE_CHARS: usize = 47;

/// Builds the session listing entry for one transcript file.
///
/// `summaries` maps a leaf message uuid to a generated summary (see [`build_summary_index`]);
/// when the session's last message has one it becomes the title, otherwise the title is
/// derived from the first user message.
///
/// # Errors
///
/// Fails when the file cannot be read (see [`for_each_record`]) or holds no user message.
pub fn summarize_session(
    path: &Path,
    summaries: &HashMap<String, String>,
    max_file_bytes: u64,
) -> Result<ChatSession> {
    let mut session_id = None;
    let mut project_path = None;
    let mut first_user_message = None;
    let mut message_count = 0;
    let mut last_updated = None;
    let mut last_message_uuid = None;

    for_each_record(path, max_file_bytes, |record| {
        if record.is_summary() {
            return;
        }
        if session_id.is_none() {
            session_id = record.session_id.clone();
            project_path = record.cwd.clone();
        }

        let Some(role) = MessageRole::from_record_type(&record.record_type) else {
            return;
        };
        message_count += 1;
        if record.timestamp.is_some() {
            last_updated = record.timestamp.clone();
        }
        if record.uuid.is_some() {
            last_message_uuid = record.uuid.clone();
        }
        if role == MessageRole::User && first_user_message.is_none() {
            first_user_message = record_to_message(&record);
        }
    })?;

    let Some(first) = first_user_message else {
        bail!("No user message found in {}", path.display());
    };

    let id = match session_id {
        Some(id) => id,
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .with_context(|| format!("Cannot derive session id from {}", path.display()))?,
    };

    let title = last_message_uuid
        .and_then(|uuid| summaries.get(&uuid).cloned())
        .unwrap_or_else(|| derive_title(&first.display_text()));

    Ok(ChatSession {
        id,
        title,
        last_updated: last_updated.unwrap_or_else(|| first.timestamp.clone()),
        timestamp: first.timestamp,
        project_path: project_path.unwrap_or_default(),
        message_count,
    })
}

/// Derives a session title from the first user message.
///
/// Leading `<...>` lines (slash-command markup) are skipped and only the first line is kept.
/// Lines longer than 50 characters are cut to 47 followed by `...`.
pub fn derive_title(first_message_text: &str) -> String {
    let repaired = repair(first_message_text);
    let content = repaired.trim();
    if content.is_empty() {
        return UNTITLED.to_string();
    }

    let content = if content.starts_with('<') {
        content
            .lines()
            .find(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('<')
            })
            .unwrap_or(content)
    } else {
        content
    };

    let first_line = content.lines().next().unwrap_or(content);
    if first_line.chars().count() <= MAX_TITLE_CHARS {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(TRUNCATED_TITLE_CHARS).collect();
        format!("{}...", truncated)
    }
}

/// Collects `leafUuid -> summary` from every transcript in a project directory.
///
/// Unreadable files are logged and skipped; summaries from other sessions in the same project
/// are included since a summary may be written to a later session's file.
pub fn build_summary_index(project_dir: &Path, max_file_bytes: u64) -> HashMap<String, String> {
    let mut index = HashMap::new();

    let entries = match fs::read_dir(project_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %project_dir.display(), error = %e, "Failed to read project directory");
            return index;
        }
    };

    for path in entries.flatten().map(|entry| entry.path()) {
        if path.extension().is_none_or(|ext| ext != "jsonl") || validate_path_not_symlink(&path).is_err() {
            continue;
        }

        let result = for_each_record(&path, max_file_bytes, |record| {
            if record.is_summary()
                && let (Some(leaf), Some(summary)) = (record.leaf_uuid, record.summary)
            {
                index.insert(leaf, summary);
            }
        });
        if let Err(e) = result {
            warn!(file = %path.display(), error = %e, "Skipping transcript while indexing summaries");
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::super::jsonl::test_support::create_test_file;
    use super::*;
    use crate::utils::DEFAULT_MAX_FILE_SIZE_BYTES;

    fn record(kind: &str, uuid: &str, timestamp: &str, content: &str) -> String {
        json!({
            "type": kind,
            "uuid": uuid,
            "sessionId": "s-1",
            "timestamp": timestamp,
            "cwd": "/work/app",
            "message": {"role": kind, "content": content}
        })
        .to_string()
    }

    #[test]
    fn test_derive_title_short() {
        assert_eq!(derive_title("Fix the login bug"), "Fix the login bug");
    }

    #[test]
    fn test_derive_title_empty() {
        assert_eq!(derive_title("   \n  "), "Untitled Chat");
        assert_eq!(derive_title("\u{0008}"), "Untitled Chat");
    }

    #[test]
    fn test_derive_title_skips_command_markup() {
        let text = "<command-name>/init</command-name>\n<command-args></command-args>\nSet up the repo\nmore";
        assert_eq!(derive_title(text), "Set up the repo");
    }

    #[test]
    fn test_derive_title_truncates_long_line() {
        let long = "a".repeat(51);
        let title = derive_title(&long);
        assert_eq!(title, format!("{}...", "a".repeat(47)));

        let exact = "b".repeat(50);
        assert_eq!(derive_title(&exact), exact);
    }

    #[test]
    fn test_derive_title_truncates_by_characters() {
        let long = "é".repeat(60);
        assert_eq!(derive_title(&long).chars().count(), 50);
    }

    #[test]
    fn test_derive_title_repairs_backspaces() {
        assert_eq!(derive_title("Helo\u{0008}lo world"), "Hello world");
    }

    #[test]
    fn test_summarize_session_counts_and_timestamps() {
        let content = [
            json!({"type": "summary", "summary": "Old", "leafUuid": "other"}).to_string(),
            record("user", "u1", "2025-01-01T10:00:00Z", "First question"),
            record("assistant", "a1", "2025-01-01T10:00:05Z", "Answer"),
            record("user", "u2", "2025-01-01T10:01:00Z", "Follow up"),
        ]
        .join("\n");
        let file = create_test_file(&content);

        let session =
            summarize_session(file.path(), &HashMap::new(), DEFAULT_MAX_FILE_SIZE_BYTES).unwrap();
        assert_eq!(session.id, "s-1");
        assert_eq!(session.title, "First question");
        assert_eq!(session.project_path, "/work/app");
        assert_eq!(session.message_count, 3);
        assert_eq!(session.timestamp, "2025-01-01T10:00:00Z");
        assert_eq!(session.last_updated, "2025-01-01T10:01:00Z");
    }

    #[test]
    fn test_summarize_session_uses_summary_for_last_message() {
        let content = [
            record("user", "u1", "2025-01-01T10:00:00Z", "First question"),
            record("assistant", "a1", "2025-01-01T10:00:05Z", "Answer"),
        ]
        .join("\n");
        let file = create_test_file(&content);
        let summaries = HashMap::from([("a1".to_string(), "Login bug triage".to_string())]);

        let session = summarize_session(file.path(), &summaries, DEFAULT_MAX_FILE_SIZE_BYTES).unwrap();
        assert_eq!(session.title, "Login bug triage");
    }

    #[test]
    fn test_summarize_session_without_user_message_fails() {
        let file = create_test_file(&record("assistant", "a1", "2025-01-01T10:00:05Z", "Answer"));
        let err = summarize_session(file.path(), &HashMap::new(), DEFAULT_MAX_FILE_SIZE_BYTES)
            .unwrap_err();
        assert!(err.to_string().contains("No user message"));
    }

    #[test]
    fn test_build_summary_index() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("one.jsonl"),
            [
                json!({"type": "summary", "summary": "First", "leafUuid": "leaf-1"}).to_string(),
                json!({"type": "summary", "summary": "Second", "leafUuid": "leaf-2"}).to_string(),
            ]
            .join("\n"),
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "{\"type\":\"summary\"}").unwrap();

        let index = build_summary_index(dir.path(), DEFAULT_MAX_FILE_SIZE_BYTES);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("leaf-1").map(String::as_str), Some("First"));
    }

    #[test]
    fn test_build_summary_index_missing_dir() {
        let index = build_summary_index(Path::new("/nonexistent/project"), DEFAULT_MAX_FILE_SIZE_BYTES);
        assert!(index.is_empty());
    }
}
