//! Data models for transcript viewing.
//!
//! - [`ChatSession`] / [`ProjectFolder`] - the project tree supplied by a transcript source
//! - [`TranscriptRecord`] - one raw line of a transcript file
//! - [`ChatMessage`] / [`MessageContent`] / [`ContentSegment`] - messages as received, loosely typed
//! - [`ClassifiedSegment`] - the closed set of segment kinds renderers switch on
//! - [`Task`] - an entry of a task list extracted from tool output
//! - [`SearchResult`] / [`MatchType`] - ranked hits from a search provider
//!
//! Everything here is created by a fetch and never mutated by the normalization code, which
//! only derives new values from it.

pub mod message;
pub mod record;
pub mod search;
pub mod segment;
pub mod session;
pub mod task;

pub use message::{ChatMessage, ContentSegment, MessageContent, MessageRole};
pub use record::{RecordMessage, TranscriptRecord};
pub use search::{MatchType, SearchResult};
pub use segment::{ClassifiedSegment, ToolInvocation, ToolOutput};
pub use session::{ChatSession, ProjectFolder};
pub use task::{Task, TaskPriority, TaskStatus};
