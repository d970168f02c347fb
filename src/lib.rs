//! **dirdump** - Dump a directory's text files into one tagged stream for LLM context
//!
//! Wildcard ignore patterns (CLI + root `.gitignore`) prune the walk, a byte
//! heuristic drops binaries, and every surviving file is framed as
//! `<file path="...">...</file>`.

/// Command-line interface with clap integration
pub mod cli;

/// Run-stopping errors and their exit codes
pub mod error;

/// Core pipeline - matching, classification and emission
pub mod core {
    /// `*`/`?` wildcard matcher and ordered pattern sets
    pub mod pattern;
    pub use pattern::{PatternSet, matches, matches_any};

    /// CLI + root `.gitignore` pattern merging
    pub mod ignore_set;
    pub use ignore_set::build_pattern_set;

    /// Text/binary heuristic over a 1 KiB sample
    pub mod classify;
    pub use classify::{is_text, is_text_bytes};

    /// Regex line filter for content
    pub mod filter;
    pub use filter::LineFilter;

    /// xml/markdown framing
    pub mod format;
    pub use format::{OutputFormat, Renderer};

    /// Tree walker / emitter
    pub mod dump;
    pub use dump::{DumpStats, EmitSettings, emit, emit_with, run};
}

/// Infrastructure - options, I/O, logging and walking
pub mod infra {
    /// Run options resolved once from the command line
    pub mod config;
    pub use config::DumpOptions;

    /// Whole-file reads, memory-mapped above 1 MiB
    pub mod io;
    pub use io::{FileContent, read_file_smart};

    /// tracing subscriber setup (stderr)
    pub mod logging;

    /// Pattern-pruned directory walking
    pub mod walk;
    pub use walk::{EntryKind, FileEntry, FileWalker};
}

// Strategic re-exports for clean CLI interface
pub use cli::{Cli, Invocation, parse_args};
pub use self::core::{DumpStats, PatternSet, build_pattern_set, emit, is_text, matches, matches_any, run};
pub use error::DumpError;
pub use infra::DumpOptions;
