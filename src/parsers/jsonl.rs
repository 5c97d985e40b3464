use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::models::TranscriptRecord;
use crate::utils::safe_open_file;

/// More consecutive unparsable lines than this and the file is treated as corrupted
const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Line counts from one pass over a transcript file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_lines: usize,
    pub skipped_lines: usize,
}

/// Reads a JSONL transcript file and hands every parsable record to `on_record`, in file order.
///
/// Blank lines are ignored. Lines that are not valid JSON, or not a valid record, are logged
/// and skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be opened safely (missing, symlink, larger than
/// `max_file_bytes`), a line cannot be read, more than 50% of non-blank lines fail to parse, or
/// 100 consecutive lines fail to parse.
pub fn for_each_record<F>(path: &Path, max_file_bytes: u64, mut on_record: F) -> Result<ParseStats>
where
    F: FnMut(TranscriptRecord),
{
    let file = safe_open_file(path, max_file_bytes)?;
    let reader = BufReader::new(file);
    let mut stats = ParseStats::default();
    let mut consecutive_errors = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("Failed to read line from transcript {}", path.display()))?;

        if line.trim().is_empty() {
            continue;
        }

        stats.total_lines += 1;

        match serde_json::from_str::<TranscriptRecord>(&line) {
            Ok(record) => {
                on_record(record);
                consecutive_errors = 0;
            }
            Err(e) => {
                warn!(file = %path.display(), line = line_num + 1, error = %e, "Skipping unparsable transcript line");
                stats.skipped_lines += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in {} - file may be corrupted",
                        consecutive_errors,
                        path.display()
                    );
                }
            }
        }
    }

    if stats.total_lines > 0 {
        let failure_rate = (stats.skipped_lines as f64) / (stats.total_lines as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in {}: {} of {} lines failed ({:.1}%)",
                path.display(),
                stats.skipped_lines,
                stats.total_lines,
                failure_rate * 100.0
            );
        }
    }

    if stats.skipped_lines > 0 {
        debug!(
            file = %path.display(),
            total = stats.total_lines,
            skipped = stats.skipped_lines,
            "Parsed transcript with skipped lines"
        );
    }

    Ok(stats)
}
