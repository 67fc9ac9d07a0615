//! Command execution for the two invocation modes.

mod build;
mod generate;

pub use build::build;
pub use generate::generate;

use crate::error::{BundlerError, Result};
use std::io::{self, Write};

/// Prints `spal: <heading> (errorcode: N)<terminator>` and the error message
/// to stderr, returning exit code 1.
fn report_failure(heading: &str, terminator: &str, err: impl Into<BundlerError>) -> Result<i32> {
    let err = err.into();
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "spal: {heading} (errorcode: {}){terminator}", err.code())?;
    writeln!(stderr, "Error message:\n{}", err.to_string().trim_end())?;
    Ok(1)
}
