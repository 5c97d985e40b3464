use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::config::LimitsConfig;
use crate::utils::{decode_project_dir_name, validate_path_not_symlink};

const SESSION_FILE_EXTENSION: &str = "jsonl";

/// A project directory under `~/.claude/projects/` and the transcripts in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    /// Directory name as stored on disk
    pub encoded_name: String,
    /// The working directory the name encodes
    pub decoded_path: PathBuf,
    pub project_dir: PathBuf,
    /// `*.jsonl` files, sorted by file name
    pub session_files: Vec<PathBuf>,
}

/// Discover all projects in `<claude_dir>/projects/` and their `*.jsonl` session files
///
/// Returns an empty Vec if the projects directory doesn't exist (not an error). Projects are
/// sorted by encoded name.
///
/// # Errors
///
/// Returns an error if:
/// - The projects directory exists but cannot be read
/// - A directory entry cannot be accessed
/// - More than `limits.max_projects` projects are found (resource exhaustion)
/// - A project has more than `limits.max_sessions_per_project` session files
///
/// Project directories with names that decode to an unsafe path, symlinked directories or
/// files, and unreadable project directories are logged and skipped.
pub fn discover_projects(claude_dir: &Path, limits: &LimitsConfig) -> Result<Vec<ProjectDir>> {
    let projects_dir = claude_dir.join("projects");

    if !projects_dir.exists() {
        return Ok(Vec::new());
    }

    let mut projects = Vec::new();

    let entries = fs::read_dir(&projects_dir)
        .with_context(|| format!("Failed to read projects directory: {}", projects_dir.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        let encoded_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };

        let decoded_path = match decode_project_dir_name(&encoded_name) {
            Ok(path) => path,
            Err(e) => {
                warn!(dir = %encoded_name, error = %e, "Skipping invalid project directory");
                continue;
            }
        };

        if let Err(e) = validate_path_not_symlink(&path) {
            warn!(dir = %encoded_name, error = %e, "Skipping project directory (symlink not allowed)");
            continue;
        }

        if projects.len() >= limits.max_projects {
            bail!(
                "Resource limit exceeded: Found more than {} projects. This may indicate a misconfiguration or attack.",
                limits.max_projects
            );
        }

        let session_files = match list_session_files(&path, &encoded_name, limits)? {
            Some(files) => files,
            None => continue,
        };

        projects.push(ProjectDir { encoded_name, decoded_path, project_dir: path, session_files });
    }

    projects.sort_by(|a, b| a.encoded_name.cmp(&b.encoded_name));
    Ok(projects)
}

/// `None` when the directory cannot be read
fn list_session_files(
    project_dir: &Path,
    encoded_name: &str,
    limits: &LimitsConfig,
) -> Result<Option<Vec<PathBuf>>> {
    let files = match fs::read_dir(project_dir) {
        Ok(files) => files,
        Err(e) => {
            warn!(dir = %project_dir.display(), error = %e, "Failed to read project directory");
            return Ok(None);
        }
    };

    let mut session_files = Vec::new();
    for file in files.flatten() {
        let file_path = file.path();
        if file_path.extension().is_none_or(|ext| ext != SESSION_FILE_EXTENSION) {
            continue;
        }

        if session_files.len() >= limits.max_sessions_per_project {
            bail!(
                "Resource limit exceeded: Project {} has more than {} session files",
                encoded_name,
                limits.max_sessions_per_project
            );
        }

        if let Err(e) = validate_path_not_symlink(&file_path) {
            warn!(file = %file_path.display(), error = %e, "Skipping session file (symlink not allowed)");
            continue;
        }
        if !file_path.is_file() {
            continue;
        }
        session_files.push(file_path);
    }

    session_files.sort();
    Ok(Some(session_files))
}
