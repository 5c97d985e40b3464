//! JSONL parsers for Claude Code session transcripts
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **Individual line failures**: Malformed JSON lines are logged through `tracing` and skipped,
//!   so a single bad line does not hide the rest of a session.
//!
//! - **Catastrophic failure detection**: If >50% of lines fail to parse, or if 100 consecutive
//!   lines fail, the parser returns an error instead of a partial session.
//!
//! - **Unsafe files**: Symlinks and files above the configured size limit are refused before any
//!   line is read.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context. Callers report errors, they do not
//!   match on them.

pub mod conversation;
pub mod deserializers;
pub mod jsonl;
pub mod session;

pub use conversation::{content_from_value, parse_session_messages, record_to_message};
pub use jsonl::{ParseStats, for_each_record};
pub use session::{build_summary_index, derive_title, summarize_session};
