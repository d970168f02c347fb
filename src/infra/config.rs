//! Resolved run options.
//!
//! Everything the dump needs is decided here once, at startup, from the
//! command line. There are no config files or environment overrides; the
//! only file consulted later is the scan root's `.gitignore`.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::core::dump::EmitSettings;
use crate::core::filter::LineFilter;
use crate::core::format::{DEFAULT_TAG, OutputFormat, Renderer, validate_tag};
use crate::core::pattern::PatternSet;
use crate::error::DumpError;

#[derive(Debug, Clone)]
pub struct DumpOptions
{
    /// Scan root; all emitted paths are relative to it
    pub root: PathBuf,

    /// CLI ignore patterns, in command-line order
    pub ignore: Vec<String>,

    /// Include-only patterns (empty = everything)
    pub globs: Vec<String>,

    /// Regex for lines to drop from content
    pub filter: Option<String>,

    pub format: OutputFormat,

    pub tag: String,

    /// Emit paths instead of content blocks
    pub list_only: bool,
}

impl DumpOptions
{
    /// Defaults for everything except the root.
    pub fn new(root: impl Into<PathBuf>) -> Self
    {
        Self {
            root: root.into(),
            ignore: Vec::new(),
            globs: Vec::new(),
            filter: None,
            format: OutputFormat::Xml,
            tag: DEFAULT_TAG.to_string(),
            list_only: false,
        }
    }

    /// Resolve parsed arguments. A missing `--dir` means the current
    /// working directory at the time of this call.
    pub fn from_cli(cli: Cli) -> Result<Self, DumpError>
    {
        let root = match cli.dir
        {
            Some(dir) => dir,
            None => std::env::current_dir()
                .map_err(|_| DumpError::InvalidRoot(PathBuf::from(".")))?,
        };

        Ok(Self {
            root,
            ignore: cli.ignore,
            globs: cli.glob,
            filter: cli.filter,
            format: cli.out_fmt,
            tag: cli.xml_tag,
            list_only: cli.list,
        })
    }

    /// The root must exist and be a directory.
    pub fn validate_root(&self) -> Result<(), DumpError>
    {
        if self
            .root
            .is_dir()
        {
            Ok(())
        }
        else
        {
            Err(DumpError::InvalidRoot(
                self.root
                    .clone(),
            ))
        }
    }

    /// Compile the filter and framing into emitter settings.
    pub fn emit_settings(&self) -> Result<EmitSettings, DumpError>
    {
        validate_tag(&self.tag).map_err(DumpError::Usage)?;

        let filter = self
            .filter
            .as_deref()
            .map(LineFilter::new)
            .transpose()
            .map_err(|e| DumpError::Usage(format!("invalid filter regex: {e}")))?;

        Ok(EmitSettings {
            include: self
                .globs
                .iter()
                .cloned()
                .collect::<PatternSet>(),
            filter,
            renderer: Renderer::new(self.format, self.tag.clone()),
            list_only: self.list_only,
        })
    }
}
