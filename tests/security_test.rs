/// Security-focused integration tests
///
/// These tests verify security boundaries: symlinks, path traversal, resource limits and
/// hostile transcript content
mod common;

use std::fs;

use common::{ClaudeDirBuilder, SESSION_ID, SessionFileBuilder, simple_session};
use serde_json::json;
use transcript_viewer::config::LimitsConfig;
use transcript_viewer::utils::sanitize;
use transcript_viewer::{ClaudeProjectsSource, TranscriptSource};

#[test]
#[cfg(unix)] // Symlinks work differently on Windows
fn test_security_symlink_project_directory_rejected() {
    use std::os::unix::fs::symlink;

    let outside = ClaudeDirBuilder::new()
        .with_project("-Users%2Ftest%2Fsensitive", &[simple_session(SESSION_ID, "sensitive data", "x")])
        .build();
    let claude_dir = ClaudeDirBuilder::new().build();
    let projects_dir = claude_dir.path().join("projects");
    fs::create_dir_all(&projects_dir).unwrap();

    symlink(
        outside.path().join("projects").join("-Users%2Ftest%2Fsensitive"),
        projects_dir.join("-Users%2Ftest%2Fmalicious"),
    )
    .unwrap();

    let source = ClaudeProjectsSource::new(claude_dir.path());
    assert!(source.fetch_all_projects().unwrap().is_empty(), "Symlinked project must be skipped");
    assert!(source.fetch_search_results("sensitive").unwrap().is_empty());
    assert!(source.fetch_messages(SESSION_ID).is_err());
}

#[test]
fn test_security_path_traversal_in_encoded_name() {
    let claude_dir = ClaudeDirBuilder::new()
        .with_project("-Users%2F..%2F..%2Fetc", &[simple_session(SESSION_ID, "traversal", "x")])
        .build();

    let source = ClaudeProjectsSource::new(claude_dir.path());
    assert!(source.fetch_all_projects().unwrap().is_empty());
    assert!(source.fetch_search_results("traversal").unwrap().is_empty());
}

#[test]
fn test_security_resource_limit_max_projects() {
    let mut builder = ClaudeDirBuilder::new();
    for i in 0..3 {
        builder = builder.with_project(
            &format!("-Users%2Ftest%2Fproject{}", i),
            &[simple_session(&format!("s{}", i), "hello", "hi")],
        );
    }
    let claude_dir = builder.build();

    let source = ClaudeProjectsSource::new(claude_dir.path())
        .with_limits(LimitsConfig { max_projects: 2, ..LimitsConfig::default() });
    let err = source.fetch_all_projects().unwrap_err();
    assert!(err.to_string().contains("Resource limit exceeded"));
}

#[test]
fn test_security_hidden_and_foreign_files_ignored() {
    let claude_dir = ClaudeDirBuilder::new()
        .with_project("-Users%2Ftest%2Fproject", &[simple_session(SESSION_ID, "valid", "x")])
        .build();
    let project_dir = claude_dir.path().join("projects").join("-Users%2Ftest%2Fproject");
    fs::write(project_dir.join(".DS_Store"), b"\x00\x01binary").unwrap();
    fs::write(project_dir.join("notes.json"), b"{\"sessionId\":\"x\"}").unwrap();

    let projects = ClaudeProjectsSource::new(claude_dir.path()).fetch_all_projects().unwrap();
    assert_eq!(projects[0].chat_sessions.len(), 1);
}

#[test]
fn test_security_session_id_is_not_a_path() {
    let claude_dir = ClaudeDirBuilder::new()
        .with_project("-Users%2Ftest%2Fproject", &[simple_session(SESSION_ID, "valid", "x")])
        .build();
    let source = ClaudeProjectsSource::new(claude_dir.path());

    assert!(source.fetch_session_file_path("../../etc/passwd").is_err());
    assert!(source.fetch_session_file_path(&format!("../{}", SESSION_ID)).is_err());
}

#[test]
fn test_security_escape_sequences_are_sanitized_for_display() {
    let claude_dir = ClaudeDirBuilder::new()
        .with_project(
            "-Users%2Ftest%2Fproject",
            &[SessionFileBuilder::new(SESSION_ID).user("u1", json!("\u{1b}[2J\u{1b}[Hcleared\u{7}"))],
        )
        .build();

    let messages = ClaudeProjectsSource::new(claude_dir.path()).fetch_messages(SESSION_ID).unwrap();
    let text = messages[0].display_text();
    assert!(text.contains('\u{1b}'), "Stored text is kept as written");
    assert_eq!(sanitize(&text), "cleared");
}

#[test]
fn test_security_deeply_nested_tool_input() {
    let mut nested = json!("leaf");
    for _ in 0..64 {
        nested = json!({"n": nested});
    }
    let session = SessionFileBuilder::new(SESSION_ID)
        .user("u1", json!("go"))
        .assistant("a1", "msg_1", json!([{"type": "tool_use", "id": "t", "name": "Deep", "input": nested}]));
    let claude_dir = ClaudeDirBuilder::new().with_project("-Users%2Ftest%2Fproject", &[session]).build();

    let source = ClaudeProjectsSource::new(claude_dir.path());
    assert_eq!(source.fetch_messages(SESSION_ID).unwrap().len(), 2);
    assert_eq!(source.fetch_search_results("leaf").unwrap().len(), 1);
}
