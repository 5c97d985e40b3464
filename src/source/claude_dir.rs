use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::TranscriptSource;
use super::discovery::{ProjectDir, discover_projects};
use crate::config::{Config, LimitsConfig, SearchConfig};
use crate::models::{ChatMessage, ChatSession, ProjectFolder, SearchResult, TranscriptRecord};
use crate::parsers::{build_summary_index, parse_session_messages, summarize_session};
use crate::search::search_session_file;
use crate::utils::safe_open_file;

/// Reads transcripts from a Claude directory (usually `~/.claude`)
#[derive(Debug, Clone)]
pub struct ClaudeProjectsSource {
    claude_dir: PathBuf,
    search: SearchConfig,
    limits: LimitsConfig,
}

impl ClaudeProjectsSource {
    pub fn new(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
            search: SearchConfig::default(),
            limits: LimitsConfig::default(),
        }
    }

    pub fn from_config(config: &Config, claude_dir_override: Option<&Path>) -> Result<Self> {
        Ok(Self {
            claude_dir: config.resolve_claude_dir(claude_dir_override)?,
            search: config.search.clone(),
            limits: config.limits.clone(),
        })
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    fn max_file_bytes(&self) -> u64 {
        self.limits.max_file_size_bytes()
    }

    fn load_project(&self, dir: &ProjectDir) -> Option<ProjectFolder> {
        let summaries = build_summary_index(&dir.project_dir, self.max_file_bytes());

        let mut sessions: Vec<ChatSession> = dir
            .session_files
            .iter()
            .filter_map(|file| match summarize_session(file, &summaries, self.max_file_bytes()) {
                Ok(session) => Some(session),
                Err(e) => {
                    debug!(file = %file.display(), error = %e, "Not listing transcript as a session");
                    None
                }
            })
            .collect();

        if sessions.is_empty() {
            return None;
        }
        sessions.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));

        let name = match sessions[0].project_path.as_str() {
            "" => dir.decoded_path.display().to_string(),
            cwd => cwd.to_string(),
        };

        Some(ProjectFolder {
            name,
            path: dir.project_dir.display().to_string(),
            chat_sessions: sessions,
        })
    }

    fn find_session_file(&self, session_id: &str) -> Result<PathBuf> {
        let projects = discover_projects(&self.claude_dir, &self.limits)?;

        // Claude Code names transcripts after the session id
        if Uuid::parse_str(session_id).is_ok() {
            let file_name = format!("{}.jsonl", session_id);
            let direct = projects
                .iter()
                .flat_map(|p| p.session_files.iter())
                .find(|f| f.file_name().is_some_and(|n| n == file_name.as_str()));
            if let Some(path) = direct {
                return Ok(path.clone());
            }
        }

        for file in projects.iter().flat_map(|p| p.session_files.iter()) {
            match self.file_contains_session_id(file, session_id) {
                Ok(true) => return Ok(file.clone()),
                Ok(false) => {}
                Err(e) => warn!(file = %file.display(), error = %e, "Skipping unreadable transcript"),
            }
        }

        bail!("Session file not found for ID: {}", session_id)
    }

    fn file_contains_session_id(&self, path: &Path, session_id: &str) -> Result<bool> {
        let file = safe_open_file(path, self.max_file_bytes())?;

        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            if !line.contains("\"sessionId\"") || !line.contains(session_id) {
                continue;
            }
            if let Ok(record) = serde_json::from_str::<TranscriptRecord>(&line)
                && record.session_id.as_deref() == Some(session_id)
            {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl TranscriptSource for ClaudeProjectsSource {
    fn fetch_all_projects(&self) -> Result<Vec<ProjectFolder>> {
        let dirs = discover_projects(&self.claude_dir, &self.limits)?;
        let mut projects: Vec<ProjectFolder> =
            dirs.iter().filter_map(|dir| self.load_project(dir)).collect();

        projects.sort_by(|a, b| b.latest_activity().cmp(&a.latest_activity()));

        info!(
            projects = projects.len(),
            sessions = projects.iter().map(|p| p.chat_sessions.len()).sum::<usize>(),
            "Loaded projects"
        );
        Ok(projects)
    }

    fn fetch_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let path = self.find_session_file(session_id)?;
        parse_session_messages(&path, self.max_file_bytes())
    }

    fn fetch_search_results(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.chars().count() < self.search.min_query_length {
            debug!(query, min = self.search.min_query_length, "Query too short, skipping search");
            return Ok(Vec::new());
        }

        let query_lower = query.to_lowercase();
        let files: Vec<PathBuf> = discover_projects(&self.claude_dir, &self.limits)?
            .into_iter()
            .flat_map(|p| p.session_files)
            .collect();

        // collect() on an indexed parallel iterator keeps input order
        let per_file: Vec<Vec<SearchResult>> = files
            .par_iter()
            .map(|file| {
                match search_session_file(
                    file,
                    &query_lower,
                    self.search.snippet_context_chars,
                    self.max_file_bytes(),
                ) {
                    Ok(results) => results,
                    Err(e) => {
                        warn!(file = %file.display(), error = %e, "Skipping transcript during search");
                        Vec::new()
                    }
                }
            })
            .collect();

        let results: Vec<SearchResult> = per_file.into_iter().flatten().collect();
        info!(query, files = files.len(), results = results.len(), "Search finished");
        Ok(results)
    }

    fn fetch_session_file_path(&self, session_id: &str) -> Result<PathBuf> {
        self.find_session_file(session_id)
    }
}
