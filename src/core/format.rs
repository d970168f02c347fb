//! Output framing for dumped files.
//!
//! Paths and content are written verbatim; nothing is escaped. Consumers are
//! expected to be lenient readers, not strict XML parsers.

use std::io::{self, Write};

use clap::ValueEnum;

/// Default tag name for xml framing.
pub const DEFAULT_TAG: &str = "file";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<file path="...">` blocks
    #[default]
    Xml,
    /// Fenced code blocks labelled with the path
    Md,
}

/// Writes one framed block per file, or bare paths in list mode.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    tag: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(OutputFormat::Xml, DEFAULT_TAG)
    }
}

impl Renderer {
    pub fn new(format: OutputFormat, tag: impl Into<String>) -> Self {
        Self { format, tag: tag.into() }
    }

    /// Write one file block:
    ///
    /// ```text
    /// <file path="REL">
    /// CONTENT
    /// </file>
    ///
    /// ```
    pub fn write_entry<W: Write>(&self, w: &mut W, rel: &str, content: &[u8]) -> io::Result<()> {
        match self.format {
            OutputFormat::Xml => {
                writeln!(w, "<{} path=\"{}\">", self.tag, rel)?;
                w.write_all(content)?;
                write!(w, "\n</{}>\n\n", self.tag)
            }
            OutputFormat::Md => {
                writeln!(w, "```{rel}")?;
                w.write_all(content)?;
                w.write_all(b"\n```\n\n")
            }
        }
    }

    /// List mode: one relative path per line.
    pub fn write_path<W: Write>(&self, w: &mut W, rel: &str) -> io::Result<()> {
        writeln!(w, "{rel}")
    }
}

/// Reject tag names that would break the framing.
pub fn validate_tag(tag: &str) -> Result<(), String> {
    if tag.is_empty() {
        return Err("xml tag must not be empty".to_string());
    }
    if let Some(bad) = tag
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '/'))
    {
        return Err(format!("invalid character {bad:?} in xml tag {tag:?}"));
    }
    Ok(())
}
