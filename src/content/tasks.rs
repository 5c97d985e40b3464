//! Task list extraction from tool output.
//!
//! A todo-writing tool reports its new task list twice: once in a structured side-channel
//! payload and once, best effort, as JSON embedded in its confirmation text. Neither source is
//! reliable across producer versions, so extraction tries them in a fixed order and the first
//! one that yields a task list wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::models::{Task, ToolOutput};

/// Substrings in tool output text that mark a task list mutation (case-sensitive)
pub const TASK_LIST_MARKERS: &[&str] = &["Todos have been modified successfully", "todo list"];

/// Field holding the new task list, in both the structured payload and the embedded JSON
pub const TASK_LIST_FIELD: &str = "newTodos";

/// From the first `{` to the last `}`
static EMBEDDED_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("embedded object pattern is valid"));

/// A named way of pulling a value out of some input
pub type Strategy<I, T> = (&'static str, fn(&I) -> Option<T>);

const TASK_STRATEGIES: &[Strategy<ToolOutput, Vec<Task>>] =
    &[("structured_payload", from_structured_payload), ("embedded_json", from_embedded_json)];

/// Runs `strategies` in order and returns the first result produced
pub fn first_success<I, T>(strategies: &[Strategy<I, T>], input: &I) -> Option<T> {
    strategies.iter().find_map(|(name, strategy)| {
        let result = strategy(input);
        if result.is_some() {
            debug!(strategy = *name, "extraction strategy succeeded");
        }
        result
    })
}

/// Whether the output text announces a task list mutation
pub fn is_task_list_mutation(output: &ToolOutput) -> bool {
    output
        .raw_text
        .as_deref()
        .is_some_and(|text| TASK_LIST_MARKERS.iter().any(|marker| text.contains(marker)))
}

/// Extracts the task list a tool output reports, if it reports one.
///
/// Returns `None` when the text carries no task list marker, whatever the structured payload
/// holds, and also when a marker is present but neither source yields a usable list.
pub fn extract_tasks(output: &ToolOutput) -> Option<Vec<Task>> {
    if !is_task_list_mutation(output) {
        return None;
    }

    let tasks = first_success(TASK_STRATEGIES, output);
    if tasks.is_none() {
        debug!(
            correlation_id = output.correlation_id.as_deref().unwrap_or("-"),
            "task list marker present but no task list could be extracted"
        );
    }
    tasks
}

fn from_structured_payload(output: &ToolOutput) -> Option<Vec<Task>> {
    output.structured_payload.as_ref().and_then(task_list_field)
}

fn from_embedded_json(output: &ToolOutput) -> Option<Vec<Task>> {
    let text = output.raw_text.as_deref()?;
    let candidate = EMBEDDED_OBJECT.find(text)?;
    match serde_json::from_str::<Value>(candidate.as_str()) {
        Ok(value) => task_list_field(&value),
        Err(e) => {
            debug!(error = %e, "embedded JSON in tool output did not parse");
            None
        }
    }
}

fn task_list_field(value: &Value) -> Option<Vec<Task>> {
    let list = value.get(TASK_LIST_FIELD)?;
    if !list.is_array() {
        return None;
    }
    match serde_json::from_value::<Vec<Task>>(list.clone()) {
        Ok(tasks) => Some(tasks),
        Err(e) => {
            debug!(error = %e, "task list entries did not decode");
            None
        }
    }
}
