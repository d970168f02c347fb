//! Filepath: src/core/dump.rs
//! Tree walker / emitter: the part that ties patterns, classification and
//! framing together.
//!
//! Per entry:
//!   - directories matching by bare name are pruned by the walker
//!   - files matching by relative path or bare name are skipped unread
//!   - optional include globs narrow what is left
//!   - binary files (by sample) are skipped
//!   - everything else is read whole, then framed and written
//!
//! Unreadable files are skipped silently; only sink write failures abort.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, trace};

use crate::core::classify;
use crate::core::filter::LineFilter;
use crate::core::format::Renderer;
use crate::core::ignore_set::build_pattern_set;
use crate::core::pattern::PatternSet;
use crate::error::DumpError;
use crate::infra::config::DumpOptions;
use crate::infra::io::read_file_smart;
use crate::infra::walk::{FileEntry, FileWalker};

/// How surviving files are filtered and written.
#[derive(Debug, Clone, Default)]
pub struct EmitSettings {
    /// When non-empty, a file must match one of these to be emitted
    pub include: PatternSet,
    pub filter: Option<LineFilter>,
    pub renderer: Renderer,
    pub list_only: bool,
}

/// Counters for one run, logged at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpStats {
    pub emitted: usize,
    pub dirs: usize,
    pub ignored: usize,
    pub excluded: usize,
    pub binary: usize,
    pub unreadable: usize,
}

enum Outcome {
    Emitted,
    Ignored,
    Excluded,
    Binary,
    Unreadable,
}

/// Dump every text file under `scan_root` with default framing.
pub fn emit<W: Write>(scan_root: &Path, patterns: &PatternSet, sink: &mut W) -> Result<DumpStats> {
    emit_with(scan_root, patterns, &EmitSettings::default(), sink)
}

/// Dump with explicit settings. The pattern set is fixed for the whole walk.
#[instrument(skip_all, fields(root = %scan_root.display(), patterns = patterns.len()))]
pub fn emit_with<W: Write>(
    scan_root: &Path,
    patterns: &PatternSet,
    settings: &EmitSettings,
    sink: &mut W,
) -> Result<DumpStats> {
    let walker = FileWalker::new(patterns.clone());
    let mut stats = DumpStats::default();

    for entry in walker.entries(scan_root) {
        if entry.is_dir() {
            stats.dirs += 1;
            continue;
        }

        match emit_file(&entry, walker.patterns(), settings, sink)? {
            Outcome::Emitted => stats.emitted += 1,
            Outcome::Ignored => stats.ignored += 1,
            Outcome::Excluded => stats.excluded += 1,
            Outcome::Binary => stats.binary += 1,
            Outcome::Unreadable => stats.unreadable += 1,
        }
    }

    sink.flush().context("Failed to flush output")?;
    Ok(stats)
}

fn emit_file<W: Write>(
    entry: &FileEntry,
    patterns: &PatternSet,
    settings: &EmitSettings,
    sink: &mut W,
) -> Result<Outcome> {
    let rel = entry.relative_str();
    let name = entry.file_name();

    if patterns.is_match(&rel) || patterns.is_match(&name) {
        trace!(path = %rel, "ignored");
        return Ok(Outcome::Ignored);
    }

    if !settings.include.is_empty()
        && !settings.include.is_match(&rel)
        && !settings.include.is_match(&name)
    {
        trace!(path = %rel, "not in include globs");
        return Ok(Outcome::Excluded);
    }

    if !classify::is_text(&entry.path) {
        trace!(path = %rel, "binary");
        return Ok(Outcome::Binary);
    }

    if settings.list_only {
        settings
            .renderer
            .write_path(sink, &rel)
            .with_context(|| format!("Failed to write path {rel}"))?;
        return Ok(Outcome::Emitted);
    }

    // Fully buffered before the opening tag goes out
    let content = match read_file_smart(&entry.path) {
        Ok(c) => c,
        Err(err) => {
            let reason = format!("{err:#}");
            debug!(path = %rel, error = %reason, "skipping unreadable file");
            return Ok(Outcome::Unreadable);
        }
    };

    let body: Cow<'_, [u8]> = match &settings.filter {
        Some(f) => Cow::Owned(f.apply(content.as_ref())),
        None => Cow::Borrowed(content.as_ref()),
    };

    settings
        .renderer
        .write_entry(sink, &rel, &body)
        .with_context(|| format!("Failed to write {rel}"))?;

    Ok(Outcome::Emitted)
}

/// Full run: build the pattern set for `opts.root` and dump into `sink`.
pub fn run<W: Write>(opts: &DumpOptions, sink: &mut W) -> Result<DumpStats, DumpError> {
    opts.validate_root()?;
    let settings = opts.emit_settings()?;
    let patterns = build_pattern_set(&opts.root, &opts.ignore);
    debug!(options = ?opts, patterns = %patterns, "starting dump");

    let stats = emit_with(&opts.root, &patterns, &settings, sink).map_err(DumpError::Output)?;
    info!(
        emitted = stats.emitted,
        dirs = stats.dirs,
        ignored = stats.ignored,
        excluded = stats.excluded,
        binary = stats.binary,
        unreadable = stats.unreadable,
        "dump complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, bytes: &[u8]) {
        let p = root.join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, bytes).unwrap();
    }

    fn dump(root: &Path, patterns: &[&str]) -> (String, DumpStats) {
        let set: PatternSet = patterns.iter().copied().collect();
        let mut out = Vec::new();
        let stats = emit(root, &set, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn end_to_end_scenario() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "a.txt", b"hello");
        write(root, "b.bin", b"\x00\x01");
        write(root, "node_modules/x.txt", b"dep");

        let (out, stats) = dump(root, &["node_modules", "*.bin"]);

        assert_eq!(out, "<file path=\"a.txt\">\nhello\n</file>\n\n");
        assert_eq!(stats.emitted, 1);
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.dirs, 0);
    }

    #[test]
    fn pruned_directory_contents_are_never_seen() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "build/keep.txt", b"keep");
        write(root, "main.c", b"int main;");

        let (out, stats) = dump(root, &["build"]);

        assert!(!out.contains("keep.txt"));
        assert!(out.contains("<file path=\"main.c\">"));
        // keep.txt was neither ignored nor classified: it was never visited
        assert_eq!(stats.ignored, 0);
        assert_eq!(stats.emitted, 1);
    }

    #[test]
    fn file_patterns_match_relative_path_or_name() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "docs/notes.md", b"n");
        write(root, "src/notes.md", b"n");
        write(root, "src/lib.rs", b"l");

        let (out, _) = dump(root, &["docs/*"]);
        assert!(!out.contains("docs/notes.md"));
        assert!(out.contains("src/notes.md"));

        let (out, _) = dump(root, &["notes.md"]);
        assert!(!out.contains("notes.md"));
        assert!(out.contains("src/lib.rs"));
    }

    #[test]
    fn binary_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "img.dat", &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
        write(root, "empty.txt", b"");

        let (out, stats) = dump(root, &[]);

        assert_eq!(out, "<file path=\"empty.txt\">\n\n</file>\n\n");
        assert_eq!(stats.binary, 1);
    }

    #[test]
    fn content_is_emitted_verbatim() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "x.html", b"<p>\"hi\"</p>\r\nline2\n");

        let (out, _) = dump(root, &[]);

        assert_eq!(out, "<file path=\"x.html\">\n<p>\"hi\"</p>\r\nline2\n\n</file>\n\n");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for name in ["c.txt", "a.txt", "sub/b.txt", "sub/deeper/d.txt"] {
            write(root, name, name.as_bytes());
        }

        let (first, stats) = dump(root, &[]);
        let (second, _) = dump(root, &[]);

        assert_eq!(first, second);
        assert_eq!(first.matches("<file path=").count(), 4);
        assert_eq!(stats.dirs, 2);
    }

    #[test]
    fn include_globs_and_list_mode() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "src/lib.rs", b"pub fn x() {}");
        write(root, "README.md", b"# readme");

        let settings = EmitSettings {
            include: ["*.rs"].into_iter().collect(),
            list_only: true,
            ..EmitSettings::default()
        };
        let mut out = Vec::new();
        let stats = emit_with(root, &PatternSet::new(), &settings, &mut out).unwrap();

        let expected = format!("{}\n", Path::new("src/lib.rs").display());
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(stats.excluded, 1);
    }

    #[test]
    fn filter_and_markdown_framing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "main.py", b"# comment\nprint(1)\n");

        let settings = EmitSettings {
            filter: Some(LineFilter::new("^#").unwrap()),
            renderer: Renderer::new(OutputFormat::Md, "file"),
            ..EmitSettings::default()
        };
        let mut out = Vec::new();
        emit_with(root, &PatternSet::new(), &settings, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "```main.py\nprint(1)\n\n```\n\n");
    }

    #[test]
    fn run_reads_root_gitignore() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, ".gitignore", b"# generated\n/dist\n*.log\n");
        write(root, "dist/bundle.js", b"x");
        write(root, "debug.log", b"x");
        write(root, "app.js", b"x");

        let mut opts = DumpOptions::new(root);
        opts.ignore = vec![".gitignore".to_string()];
        let mut out = Vec::new();
        let stats = run(&opts, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "<file path=\"app.js\">\nx\n</file>\n\n");
        assert_eq!(stats.emitted, 1);
    }

    #[test]
    fn run_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let opts = DumpOptions::new(tmp.path().join("nope"));
        let mut out = Vec::new();

        assert!(matches!(run(&opts, &mut out), Err(DumpError::InvalidRoot(_))));
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_files_are_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "locked.txt", b"secret");
        write(root, "open.txt", b"ok");
        fs::set_permissions(root.join("locked.txt"), fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root bypasses permission bits; nothing to check then
        if fs::read(root.join("locked.txt")).is_ok() {
            return;
        }

        let (out, _) = dump(root, &[]);
        assert_eq!(out, "<file path=\"open.txt\">\nok\n</file>\n\n");
    }
}
