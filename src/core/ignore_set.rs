//! Filepath: src/core/ignore_set.rs
//! Merge CLI ignore patterns with the scan root's `.gitignore`.
//!
//! Only the root-level ignore file is read. Its lines are taken almost
//! literally: blank lines and `#` comments are dropped, a single leading
//! `/` is stripped, and nothing else is interpreted.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::core::pattern::PatternSet;

/// Name of the ignore file looked up directly inside the scan root.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Build the run's pattern set: CLI patterns first (in order), then the
/// root ignore file's patterns (in file order).
///
/// A missing or unreadable ignore file contributes nothing. The file is
/// decoded lossily, so non-UTF-8 bytes become U+FFFD in the patterns.
#[instrument(skip(cli_patterns), fields(cli = cli_patterns.len()))]
pub fn build_pattern_set(
    scan_root: &Path,
    cli_patterns: &[String],
) -> PatternSet {
    let mut set: PatternSet = cli_patterns.iter().cloned().collect();

    let path = scan_root.join(IGNORE_FILE_NAME);
    match fs::read(&path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let before = set.len();
            set.extend(parse_ignore_lines(&text));
            debug!(
                file = %path.display(),
                added = set.len() - before,
                "loaded ignore file"
            );
        }
        Err(err) => {
            trace!(file = %path.display(), error = %err, "no ignore file");
        }
    }

    set
}

/// Turn ignore-file text into patterns.
///
/// `str::lines` treats `\r\n` as a terminator, so CRLF files yield the
/// same patterns as LF files. Any other trailing whitespace is kept.
pub fn parse_ignore_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.strip_prefix('/').unwrap_or(line).to_string())
}
