//! Command line interface for spal.
//!
//! Parses the invocation, dispatches to generate or build mode and turns
//! failures into the messages and exit codes users see. Nothing below this
//! module prints.

mod args;
pub mod commands;

pub use args::{Args, BuildRequest, Request, RuntimeConfig};

use crate::error::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use std::{
    ffi::OsString,
    io::{self, Write},
};

/// Text printed by `spal --version`.
pub const VERSION_TEXT: &str = concat!(
    "spal ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Copyright (c) 2025-Present Arijit Kumar Das <arijitkdgit.official@gmail.com>\n",
    "License GPLv3+: GNU GPL version 3 or later <http://gnu.org/licenses/gpl.html>\n",
    "This program is free software; you may redistribute it under the terms of\n",
    "the GNU General Public License version 3 or later.\n",
    "This program has absolutely no warranty."
);

const INVALID_ARGUMENTS: &str =
    "spal: Invalid arguments or combination of arguments.\nUse \"spal -h\" to view help.";

/// Main CLI entry point. Returns the process exit code.
pub fn run() -> Result<i32> {
    run_from(std::env::args_os())
}

/// Runs the CLI on an explicit argument list, program name first.
pub fn run_from<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        Args::command().print_long_help()?;
        return Ok(0);
    }

    let parsed = match Args::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(0);
        }
        Err(e) => {
            log::debug!("{e}");
            return invalid_arguments();
        }
    };

    let config = RuntimeConfig::from(&parsed);
    match parsed.into_request() {
        Ok(Request::Version) => {
            writeln!(io::stdout(), "{VERSION_TEXT}")?;
            Ok(0)
        }
        Ok(Request::Generate(req)) => commands::generate(&req),
        Ok(Request::Build(req)) => commands::build(&req, &config),
        Err(e) => {
            log::debug!("{e}");
            invalid_arguments()
        }
    }
}

fn invalid_arguments() -> Result<i32> {
    writeln!(io::stderr(), "{INVALID_ARGUMENTS}")?;
    Ok(1)
}
