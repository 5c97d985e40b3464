//! Transcript Viewer - Browse and search Claude Code session transcripts
//!
//! This library reads the session transcripts Claude Code stores under `~/.claude/projects/`
//! and turns their loosely-typed message bodies into display-ready values. It provides:
//!
//! - Text repair for producer output containing backspace characters
//! - Classification of raw content segments (text, tool calls, tool results, reasoning)
//! - Extraction of task lists from todo-writing tool output
//! - Full-text search with per-field match categories, category filtering, and mapping of
//!   hits back to sessions
//! - Decoding of Claude's project directory names
//!
//! # Example
//!
//! ```no_run
//! use transcript_viewer::{ClaudeProjectsSource, TranscriptSource};
//!
//! let source = ClaudeProjectsSource::new("/Users/alice/.claude");
//! for project in source.fetch_all_projects()? {
//!     println!("{} ({} sessions)", project.name, project.chat_sessions.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod filters;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod search;
pub mod source;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use content::{classify, extract_tasks, normalize, repair};
pub use filters::{MatchTypeFilter, filter_results};
pub use models::{ChatMessage, ChatSession, ClassifiedSegment, MatchType, ProjectFolder, SearchResult, Task};
pub use search::{resolve, resolve_at};
pub use source::{ClaudeProjectsSource, TranscriptSource};
pub use utils::paths::{decode_project_dir_name, format_path_with_tilde};
