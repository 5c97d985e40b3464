//! Plain-text rendering of sessions, messages and search hits.
//!
//! Renderers return unsanitized text; the caller sanitizes before writing to the terminal.

use std::fmt::Write;

use serde_json::{Map, Value};

use crate::content::{MessageBody, extract_tasks};
use crate::models::{
    ChatMessage, ChatSession, ClassifiedSegment, ProjectFolder, SearchResult, Task, TaskStatus,
    ToolInvocation, ToolOutput,
};

const INDENT: &str = "    ";

pub fn render_project(project: &ProjectFolder) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  ({} sessions)", project.name, project.chat_sessions.len());
    for session in &project.chat_sessions {
        let _ = writeln!(out, "  {}", render_session_line(session));
    }
    out
}

pub fn render_session_line(session: &ChatSession) -> String {
    format!(
        "{}  {}  {:>4} msgs  {}",
        session.id, session.last_updated, session.message_count, session.title
    )
}

/// Header line followed by the normalized body
pub fn render_message(message: &ChatMessage) -> String {
    let mut out = format!("[{}] {}", message.message_type, message.timestamp);
    if let Some(model) = &message.model {
        let _ = write!(out, " ({})", model);
    }
    out.push('\n');
    out.push_str(&render_body(&message.body()));
    out
}

pub fn render_body(body: &MessageBody) -> String {
    match body {
        MessageBody::Plain(text) => indent(text),
        MessageBody::Segments(segments) => {
            segments.iter().map(render_segment).collect::<Vec<_>>().join("\n")
        }
    }
}

pub fn render_segment(segment: &ClassifiedSegment) -> String {
    match segment {
        ClassifiedSegment::Text { body } => indent(body),
        ClassifiedSegment::ReasoningTrace { body } => {
            format!("{}(thinking)\n{}", INDENT, indent(body))
        }
        ClassifiedSegment::ToolInvocation(call) => render_tool_invocation(call),
        ClassifiedSegment::ToolOutput(output) => render_tool_output(output),
        ClassifiedSegment::Unrecognized { original_fields } => render_unrecognized(original_fields),
    }
}

fn render_tool_invocation(call: &ToolInvocation) -> String {
    let name = if call.name.is_empty() { "(unnamed)" } else { call.name.as_str() };
    let mut out = format!("{}> tool: {}", INDENT, name);
    if let Some(input) = &call.input {
        let _ = write!(out, "\n{}{}", INDENT, input);
    }
    out
}

fn render_tool_output(output: &ToolOutput) -> String {
    if let Some(tasks) = extract_tasks(output) {
        return render_tasks(&tasks);
    }

    let text = match (&output.raw_text, &output.structured_payload) {
        (Some(text), _) => text.clone(),
        (None, Some(payload)) => payload.to_string(),
        (None, None) => "(no output)".to_string(),
    };
    format!("{}< result\n{}", INDENT, indent(&text))
}

/// A checklist: `[x]` completed, `[~]` in progress, `[ ]` pending
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut out = format!("{}Tasks ({}/{} done)", INDENT, tasks.iter().filter(|t| t.is_done()).count(), tasks.len());
    for task in tasks {
        let mark = match task.status {
            TaskStatus::Completed => "[x]",
            TaskStatus::InProgress => "[~]",
            TaskStatus::Pending => "[ ]",
        };
        let _ = write!(out, "\n{}{} {}", INDENT, mark, task.content);
    }
    out
}

fn render_unrecognized(fields: &Map<String, Value>) -> String {
    let names: Vec<&str> = fields.keys().map(String::as_str).collect();
    let json = Value::Object(fields.clone());
    format!(
        "{}[unrecognized segment: {}]\n{}{}",
        INDENT,
        if names.is_empty() { "no fields".to_string() } else { names.join(", ") },
        INDENT,
        json
    )
}

pub fn render_search_hit(result: &SearchResult, session: &ChatSession) -> String {
    format!("[{}] {} ({})\n{}{}", result.match_type, session.title, session.id, INDENT, result.snippet)
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("{}{}", INDENT, line)).collect::<Vec<_>>().join("\n")
}
