//! Error taxonomy for the `dump` binary and its exit codes.
//!
//! Per-file I/O failures never show up here: they are skipped where they
//! happen. Only problems that stop the whole run are represented.

use std::io;
use std::path::PathBuf;

/// Run-stopping failures, mapped to exit codes in one place.
#[derive(thiserror::Error, Debug)]
pub enum DumpError {
    /// Argument that is not a known flag
    #[error("Unrecognized option: {0}")]
    UnrecognizedOption(String),

    /// Flag given as the last argument with no value after it
    #[error("error: missing value for {0}")]
    MissingValue(String),

    /// Any other bad invocation (invalid regex, format, tag, ...)
    #[error("error: {0}")]
    Usage(String),

    /// Scan root missing or not a directory
    #[error("Directory \"{}\" does not exist or is not a directory.", .0.display())]
    InvalidRoot(PathBuf),

    /// Writing to the output sink failed
    #[error("error: failed to write output: {0:#}")]
    Output(anyhow::Error),
}

impl DumpError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_broken_pipe() { 0 } else { 1 }
    }

    /// Usage text accompanies argument errors.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            DumpError::UnrecognizedOption(_) | DumpError::MissingValue(_) | DumpError::Usage(_)
        )
    }

    /// Downstream reader went away (e.g. `dump | head`); not worth reporting.
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            DumpError::Output(err) => err.chain().any(|cause| {
                cause
                    .downcast_ref::<io::Error>()
                    .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
            }),
            _ => false,
        }
    }
}
