//! Full-text search over session transcripts and mapping of hits back to sessions.

pub mod resolver;
pub mod scan;
pub mod snippet;

pub use resolver::{PLACEHOLDER_TITLE_PREFIX, find_session, resolve, resolve_at};
pub use scan::{match_content, search_session_file};
pub use snippet::create_snippet;
