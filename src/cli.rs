use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};

use crate::core::format::{DEFAULT_TAG, OutputFormat};
use crate::error::DumpError;

#[derive(Debug, Parser)]
#[command(name = "dump")]
#[command(
    about = "Recursively dump text files to stdout, respecting .gitignore and custom ignore patterns."
)]
#[command(disable_version_flag = true, args_override_self = true, long_about = None)]
pub struct Cli {
    /// Directory to run in (default: current working directory)
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Add pattern to ignore (e.g. -i '*.sh'); repeatable
    #[arg(short, long, value_name = "PATTERN", allow_hyphen_values = true)]
    pub ignore: Vec<String>,

    /// Only dump files whose path or name matches; repeatable
    #[arg(short, long, value_name = "PATTERN", allow_hyphen_values = true)]
    pub glob: Vec<String>,

    /// Skip lines matching this regex
    #[arg(short, long, value_name = "REGEX", allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Output format
    #[arg(short = 'o', long = "out-fmt", value_enum, default_value_t = OutputFormat::Xml)]
    pub out_fmt: OutputFormat,

    /// Custom tag name for xml output
    #[arg(long = "xml-tag", value_name = "NAME", default_value = DEFAULT_TAG)]
    pub xml_tag: String,

    /// List file paths only
    #[arg(short, long)]
    pub list: bool,
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    /// `-h/--help`: print this text and exit successfully
    Help(String),
    Run(Cli),
}

/// Parse arguments (including the program name) into an [`Invocation`].
///
/// clap's own error kinds are folded into [`DumpError`] so every bad
/// invocation exits with code 1 instead of clap's default 2.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, DumpError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Invocation::Run(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp => Ok(Invocation::Help(err.render().to_string())),
            ErrorKind::UnknownArgument => Err(DumpError::UnrecognizedOption(
                context_str(&err, ContextKind::InvalidArg).unwrap_or_default(),
            )),
            ErrorKind::InvalidValue
                if context_str(&err, ContextKind::InvalidValue).is_some_and(|v| v.is_empty()) =>
            {
                Err(DumpError::MissingValue(
                    context_str(&err, ContextKind::InvalidArg).unwrap_or_default(),
                ))
            }
            _ => Err(DumpError::Usage(first_line(&err.render().to_string()))),
        },
    }
}

/// Plain-text usage/help, printed alongside argument errors.
pub fn usage_text() -> String {
    Cli::command().render_help().to_string()
}

/// Write `-h` output. Failures go through [`DumpError::Output`] so a closed
/// pipe stays quiet and anything else exits 1.
pub fn write_help<W: Write>(sink: &mut W, text: &str) -> Result<(), DumpError> {
    sink.write_all(text.as_bytes())
        .and_then(|()| sink.flush())
        .context("Failed to write help")
        .map_err(DumpError::Output)
}

fn context_str(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind)? {
        ContextValue::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// clap messages start with "error: " and carry a usage tail; keep the core.
fn first_line(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
