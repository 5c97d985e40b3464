use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{ChatSession, ProjectFolder, SearchResult};

pub const PLACEHOLDER_TITLE_PREFIX: &str = "Search result: ";
const PLACEHOLDER_SNIPPET_CHARS: usize = 50;

/// Maps a search hit to the session it belongs to.
///
/// Returns the first session (projects in order, then sessions in order) whose id matches. A
/// hit whose session is not in `projects` gets a placeholder session so it can still be shown.
pub fn resolve<'a>(result: &SearchResult, projects: &'a [ProjectFolder]) -> Cow<'a, ChatSession> {
    resolve_at(result, projects, Utc::now())
}

/// [`resolve`] with an explicit clock for the placeholder timestamps.
pub fn resolve_at<'a>(
    result: &SearchResult,
    projects: &'a [ProjectFolder],
    now: DateTime<Utc>,
) -> Cow<'a, ChatSession> {
    match find_session(projects, &result.session_id) {
        Some(session) => Cow::Borrowed(session),
        None => Cow::Owned(placeholder_session(result, now)),
    }
}

pub fn find_session<'a>(projects: &'a [ProjectFolder], session_id: &str) -> Option<&'a ChatSession> {
    projects.iter().flat_map(|p| p.chat_sessions.iter()).find(|s| s.id == session_id)
}

fn placeholder_session(result: &SearchResult, now: DateTime<Utc>) -> ChatSession {
    let snippet: String = result.snippet.chars().take(PLACEHOLDER_SNIPPET_CHARS).collect();
    let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    ChatSession {
        id: result.session_id.clone(),
        title: format!("{}{}...", PLACEHOLDER_TITLE_PREFIX, snippet),
        timestamp: now.clone(),
        project_path: String::new(),
        message_count: 0,
        last_updated: now,
    }
}
