//! Where transcripts come from.
//!
//! [`TranscriptSource`] is the fetch boundary the CLI talks to. [`ClaudeProjectsSource`] reads
//! the on-disk layout written by Claude Code:
//!
//! ```text
//! ~/.claude/projects/
//!   -Users-alice-app/              encoded working directory (see `decode_project_dir_name`)
//!     <session-uuid>.jsonl         one transcript per session
//! ```

pub mod claude_dir;
pub mod discovery;

use std::path::PathBuf;

use anyhow::Result;

pub use claude_dir::ClaudeProjectsSource;
pub use discovery::{ProjectDir, discover_projects};

use crate::models::{ChatMessage, ProjectFolder, SearchResult};

pub trait TranscriptSource {
    /// Projects with at least one session, most recently active first
    fn fetch_all_projects(&self) -> Result<Vec<ProjectFolder>>;

    /// Display messages of one session, in transcript order
    fn fetch_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    /// Unranked hits across every session. Queries below the minimum length yield nothing.
    fn fetch_search_results(&self, query: &str) -> Result<Vec<SearchResult>>;

    fn fetch_session_file_path(&self, session_id: &str) -> Result<PathBuf>;
}
