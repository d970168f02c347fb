//! Filepath: src/infra/walk.rs
//! Pattern-pruned directory walker.
//! - Directories whose bare name matches the prune set are never entered
//! - Ripgrep's standard filters (hidden, .gitignore, global excludes) are OFF;
//!   ignore decisions come only from the caller's `PatternSet`
//! - Symlinks are not followed; a link to a regular file counts as a file
//! - Deterministic ordering (by file name within each directory)
//!
//! Backed by ripgrep's `ignore` crate.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, trace};

use crate::core::pattern::PatternSet;

/// Directory/file discriminator for a walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind
{
    Dir,
    File,
}

/// One step of the traversal. Never persisted.
#[derive(Debug, Clone)]
pub struct FileEntry
{
    /// Path as produced by the walk (root-joined)
    pub path: PathBuf,

    /// Path relative to the scan root
    pub relative: PathBuf,

    pub kind: EntryKind,
}

impl FileEntry
{
    /// Relative path as text, lossily converted.
    pub fn relative_str(&self) -> Cow<'_, str>
    {
        self.relative
            .to_string_lossy()
    }

    /// Bare file or directory name.
    pub fn file_name(&self) -> Cow<'_, str>
    {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }

    pub fn is_dir(&self) -> bool
    {
        self.kind == EntryKind::Dir
    }
}

/// Walker that prunes directories by name against a fixed pattern set.
pub struct FileWalker
{
    /// Directory-name prune patterns, shared with the walk filter
    prune: Arc<PatternSet>,
}

impl FileWalker
{
    pub fn new(prune: PatternSet) -> Self
    {
        Self { prune: Arc::new(prune) }
    }

    /// Patterns used for pruning.
    pub fn patterns(&self) -> &PatternSet
    {
        &self.prune
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // No hidden/gitignore/global filtering: patterns are ours alone
        b.standard_filters(false);
        b.follow_links(false);
        b.sort_by_file_name(|x, y| x.cmp(y));

        // Prune matching directories before descent. The root (depth 0)
        // never reaches this filter.
        let prune = Arc::clone(&self.prune);
        b.filter_entry(move |ent: &DirEntry| {
            let is_dir = ent
                .file_type()
                .is_some_and(|ft| ft.is_dir());
            if !is_dir
            {
                return true;
            }

            let name = ent
                .file_name()
                .to_string_lossy();
            if prune.is_match(&name)
            {
                debug!(dir = %ent.path().display(), "pruned directory");
                return false;
            }
            true
        });

        b
    }

    /// Traverse `root`, yielding every reachable directory and file below it
    /// (not the root itself). Walk errors are skipped.
    pub fn entries<'a>(
        &'a self,
        root: &'a Path,
    ) -> impl Iterator<Item = FileEntry> + 'a
    {
        self.build_walk(root)
            .build()
            .filter_map(|res| match res
            {
                Ok(ent) => Some(ent),
                Err(err) =>
                {
                    debug!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|ent| ent.depth() > 0)
            .filter_map(move |ent| to_file_entry(root, ent))
    }
}

/// Classify a walk entry; FIFOs, sockets, devices and dangling or
/// directory symlinks yield `None`.
fn to_file_entry(
    root: &Path,
    ent: DirEntry,
) -> Option<FileEntry>
{
    let ft = ent.file_type()?;
    let kind = if ft.is_dir()
    {
        EntryKind::Dir
    }
    else if ft.is_file() || (ft.is_symlink() && ent.path().is_file())
    {
        EntryKind::File
    }
    else
    {
        trace!(path = %ent.path().display(), "skipping non-regular entry");
        return None;
    };

    let relative = ent
        .path()
        .strip_prefix(root)
        .ok()?
        .to_path_buf();

    Some(FileEntry {
        path: ent.into_path(),
        relative,
        kind,
    })
}
