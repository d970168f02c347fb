use std::io::{self, BufWriter};
use std::process::ExitCode;

use dirdump::cli::{Invocation, parse_args, usage_text, write_help};
use dirdump::{DumpError, DumpOptions};

fn main() -> ExitCode {
    dirdump::infra::logging::init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

fn try_main() -> Result<(), DumpError> {
    let cli = match parse_args(std::env::args_os())? {
        Invocation::Help(text) => {
            // Help goes to stdout like the dump itself
            return write_help(&mut io::stdout().lock(), &text);
        }
        Invocation::Run(cli) => cli,
    };

    // Resolve the cwd default once, before anything touches the filesystem
    let opts = DumpOptions::from_cli(cli)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    dirdump::run(&opts, &mut out)?;
    Ok(())
}

/// Centralized error reporting and exit-code mapping
fn report(err: DumpError) -> ExitCode {
    if err.is_broken_pipe() {
        return ExitCode::from(err.exit_code());
    }

    eprintln!("{err}");
    if err.wants_usage() {
        eprintln!("{}", usage_text());
    }
    ExitCode::from(err.exit_code())
}
