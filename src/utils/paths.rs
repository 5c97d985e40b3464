use std::fs::{self, File, OpenOptions};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use percent_encoding::percent_decode_str;

use super::environment::home_dir;

/// Default ceiling for a single transcript file: 50MB
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Decodes a project directory name back into the working directory it was created for.
///
/// Claude Code names project directories after the session's working directory. Two forms
/// are understood:
///
/// - percent-encoded (`-Users%2Falice%2Fapp`), decoded exactly
/// - dash-separated (`-Users-alice-app`), decoded best effort since a `-` inside a directory
///   name is indistinguishable from a separator
///
/// The result is only a display fallback; sessions carry their real `cwd`.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use transcript_viewer::utils::decode_project_dir_name;
///
/// assert_eq!(decode_project_dir_name("-Users%2Ffoo%2Fbar").unwrap(), PathBuf::from("/Users/foo/bar"));
/// assert_eq!(decode_project_dir_name("-Users-foo-bar").unwrap(), PathBuf::from("/Users/foo/bar"));
/// ```
///
/// # Errors
///
/// Returns an error if the decoded path contains a `..` component or a NUL byte.
pub fn decode_project_dir_name(name: &str) -> Result<PathBuf> {
    let body = name.strip_prefix('-').unwrap_or(name);

    let decoded = if body.contains('%') {
        percent_decode_str(body).decode_utf8_lossy().into_owned()
    } else {
        body.replace('-', "/")
    };

    if decoded.contains('\0') {
        bail!("Project directory name contains a NUL byte: {}", name);
    }

    let path = PathBuf::from(format!("/{}", decoded));
    if path.components().any(|c| c == Component::ParentDir) {
        bail!("Path contains '..' component: {}", path.display());
    }

    Ok(path)
}

/// Validates that a file's size is within `max_bytes`
///
/// Takes the open handle so the size checked is the size of the file that will be read.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than `max_bytes`
pub fn validate_file_size(file: &File, path: &Path, max_bytes: u64) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > max_bytes {
        bail!("File too large: {} ({} bytes, max {} bytes)", path.display(), file_size, max_bytes);
    }

    Ok(())
}

/// Rejects symlinks. Uses `symlink_metadata` so the link itself is inspected, not its target.
pub fn validate_path_not_symlink(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    if metadata.file_type().is_symlink() {
        bail!("Path is a symlink: {}", path.display());
    }
    Ok(())
}

/// Opens a transcript file for reading without following symlinks, then checks its size
/// against `max_bytes` on the opened handle.
pub fn safe_open_file(path: &Path, max_bytes: u64) -> Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    let file = options.open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    validate_file_size(&file, path, max_bytes)?;
    Ok(file)
}

/// Formats a path with `~` in place of the home directory
///
/// ```no_run
/// use std::path::Path;
/// use transcript_viewer::utils::format_path_with_tilde;
///
/// // "~/.claude" when HOME=/Users/alice
/// let formatted = format_path_with_tilde(Path::new("/Users/alice/.claude"));
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    tilde_under(path, home_dir().as_deref())
}

fn tilde_under(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}
