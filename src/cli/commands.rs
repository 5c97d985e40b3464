use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::render::{render_message, render_project, render_search_hit};
use crate::config::Config;
use crate::filters::{MatchTypeFilter, count_by_match_type, filter_results};
use crate::logging;
use crate::models::MatchType;
use crate::search::resolve;
use crate::source::{ClaudeProjectsSource, TranscriptSource};
use crate::utils::{format_path_with_tilde, sanitize};

#[derive(Parser)]
#[command(name = "transcript-viewer")]
#[command(version)]
#[command(about = "Browse and search Claude Code session transcripts", long_about = None)]
pub struct Cli {
    /// Claude data directory [default: from config, then ~/.claude]
    #[arg(long, global = true, value_name = "DIR")]
    pub claude_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects and their sessions, most recent first
    Projects,
    /// Print a session transcript
    Show { session_id: String },
    /// Search all transcripts
    Search {
        query: String,
        /// Only show hits of this category (repeatable): content, thinking, tool_name,
        /// tool_input, tool_result, tool_structured_result
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        types: Vec<MatchType>,
    },
    /// Print the transcript file backing a session
    Path { session_id: String },
    /// Show statistics about the transcripts
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init(&config.logging)?;

    let source = ClaudeProjectsSource::from_config(&config, cli.claude_dir.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(command) => execute(command, &source, source.claude_dir(), &mut out),
        None => {
            writeln!(out, "Use --help for usage information")?;
            Ok(())
        }
    }
}

/// Runs one command against `source`, writing sanitized output to `out`
pub fn execute<S, W>(command: &Commands, source: &S, claude_dir: &Path, out: &mut W) -> Result<()>
where
    S: TranscriptSource,
    W: Write,
{
    match command {
        Commands::Projects => show_projects(source, out),
        Commands::Show { session_id } => show_session(source, session_id, out),
        Commands::Search { query, types } => search(source, query, types, out),
        Commands::Path { session_id } => {
            let path = source.fetch_session_file_path(session_id)?;
            writeln!(out, "{}", sanitize(&path.display().to_string()))?;
            Ok(())
        }
        Commands::Stats => show_stats(source, claude_dir, out),
    }
}

fn print<W: Write>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out, "{}", sanitize(text)).context("Failed to write output")
}

fn show_projects<S: TranscriptSource, W: Write>(source: &S, out: &mut W) -> Result<()> {
    let projects = source.fetch_all_projects()?;
    if projects.is_empty() {
        return print(out, "No projects found");
    }
    for project in &projects {
        print(out, &render_project(project))?;
    }
    Ok(())
}

fn show_session<S: TranscriptSource, W: Write>(source: &S, session_id: &str, out: &mut W) -> Result<()> {
    let messages = source.fetch_messages(session_id)?;
    print(out, &format!("Session {} ({} messages)", session_id, messages.len()))?;
    for message in &messages {
        writeln!(out)?;
        print(out, &render_message(message))?;
    }
    Ok(())
}

fn search<S: TranscriptSource, W: Write>(
    source: &S,
    query: &str,
    types: &[MatchType],
    out: &mut W,
) -> Result<()> {
    let filter = if types.is_empty() {
        MatchTypeFilter::all()
    } else {
        MatchTypeFilter::only(types.iter().copied())
    };

    let results = filter_results(source.fetch_search_results(query)?, &filter);
    if results.is_empty() {
        return print(out, &format!("No results for \"{}\"", query));
    }

    let projects = source.fetch_all_projects()?;
    for result in &results {
        let session = resolve(result, &projects);
        print(out, &render_search_hit(result, &session))?;
    }

    let counts = count_by_match_type(&results)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(match_type, count)| format!("{} {}", count, match_type))
        .collect::<Vec<_>>()
        .join(", ");
    print(out, &format!("\n{} results ({})", results.len(), counts))
}

fn show_stats<S: TranscriptSource, W: Write>(source: &S, claude_dir: &Path, out: &mut W) -> Result<()> {
    let projects = source.fetch_all_projects()?;
    let sessions: usize = projects.iter().map(|p| p.chat_sessions.len()).sum();
    let messages: usize = projects.iter().map(|p| p.message_count()).sum();

    let mut lines = vec![
        "Claude Code Transcript Statistics".to_string(),
        "=================================".to_string(),
        format!("Projects: {}", projects.len()),
        format!("Sessions: {}", sessions),
        format!("Messages: {}", messages),
        String::new(),
        format!("Claude directory: {}", format_path_with_tilde(claude_dir)),
    ];

    let activity = projects.iter().flat_map(|p| p.chat_sessions.iter()).map(|s| s.last_updated.as_str());
    if let Some(newest) = activity.clone().max() {
        lines.push(format!("Most recent activity: {}", newest));
    }
    if let Some(oldest) = activity.min() {
        lines.push(format!("Oldest activity: {}", oldest));
    }

    print(out, &lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;
    use crate::models::{
        ChatMessage, ChatSession, MessageContent, MessageRole, ProjectFolder, SearchResult,
    };

    struct FakeSource {
        projects: Vec<ProjectFolder>,
        results: Vec<SearchResult>,
    }

    impl TranscriptSource for FakeSource {
        fn fetch_all_projects(&self) -> Result<Vec<ProjectFolder>> {
            Ok(self.projects.clone())
        }

        fn fetch_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
            if session_id != "s1" {
                bail!("Session file not found for ID: {}", session_id);
            }
            Ok(vec![ChatMessage {
                uuid: "u1".into(),
                parent_uuid: None,
                timestamp: "2025-01-01T10:00:00Z".into(),
                message_type: MessageRole::User,
                content: MessageContent::Plain("\x1b[31mred\x1b[0m text".into()),
                tool_use_id: None,
                cwd: None,
                version: None,
                model: None,
            }])
        }

        fn fetch_search_results(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Ok(self.results.clone())
        }

        fn fetch_session_file_path(&self, session_id: &str) -> Result<PathBuf> {
            Ok(PathBuf::from(format!("/claude/projects/p/{}.jsonl", session_id)))
        }
    }

    fn fake() -> FakeSource {
        let session = ChatSession {
            id: "s1".into(),
            title: "Known session".into(),
            timestamp: "2025-01-01T10:00:00Z".into(),
            project_path: "/work".into(),
            message_count: 3,
            last_updated: "2025-01-02T10:00:00Z".into(),
        };
        let hit = |session_id: &str, match_type: MatchType| SearchResult {
            session_id: session_id.into(),
            message_uuid: "m".into(),
            snippet: format!("{} snippet", match_type),
            match_type,
        };
        FakeSource {
            projects: vec![ProjectFolder { name: "/work".into(), path: "/p".into(), chat_sessions: vec![session] }],
            results: vec![hit("s1", MatchType::Content), hit("gone", MatchType::ToolName)],
        }
    }

    fn run_command(command: Commands) -> Result<String> {
        let mut out = Vec::new();
        execute(&command, &fake(), Path::new("/claude"), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_show_sanitizes_output() {
        let output = run_command(Commands::Show { session_id: "s1".into() }).unwrap();
        assert!(output.contains("Session s1 (1 messages)"));
        assert!(output.contains("red text"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_show_unknown_session_errors() {
        assert!(run_command(Commands::Show { session_id: "nope".into() }).is_err());
    }

    #[test]
    fn test_search_resolves_known_and_unknown_sessions() {
        let output = run_command(Commands::Search { query: "snippet".into(), types: vec![] }).unwrap();
        assert!(output.contains("[content] Known session (s1)"));
        assert!(output.contains("[tool_name] Search result: tool_name snippet... (gone)"));
        assert!(output.contains("2 results (1 content, 1 tool_name)"));
    }

    #[test]
    fn test_search_filters_by_type() {
        let output = run_command(Commands::Search {
            query: "snippet".into(),
            types: vec![MatchType::ToolName],
        })
        .unwrap();
        assert!(!output.contains("[content]"));
        assert!(output.contains("1 results (1 tool_name)"));

        let none = run_command(Commands::Search { query: "snippet".into(), types: vec![MatchType::Thinking] })
            .unwrap();
        assert!(none.contains("No results for \"snippet\""));
    }

    #[test]
    fn test_stats() {
        let output = run_command(Commands::Stats).unwrap();
        assert!(output.contains("Projects: 1"));
        assert!(output.contains("Sessions: 1"));
        assert!(output.contains("Messages: 3"));
        assert!(output.contains("Claude directory: /claude"));
        assert!(output.contains("Most recent activity: 2025-01-02T10:00:00Z"));
    }

    #[test]
    fn test_path() {
        let output = run_command(Commands::Path { session_id: "abc".into() }).unwrap();
        assert_eq!(output.trim(), "/claude/projects/p/abc.jsonl");
    }
}
