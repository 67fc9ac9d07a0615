//! Generate mode: write a build configuration from loose input files.

use super::report_failure;
use crate::{
    bundler::{GenerateRequest, mk_bundle},
    error::Result,
};
use std::io::{self, Write};

/// Writes the build configuration and prints its path.
pub fn generate(req: &GenerateRequest) -> Result<i32> {
    match mk_bundle(req) {
        Ok(path) => {
            writeln!(io::stdout(), "{}", path.display())?;
            Ok(0)
        }
        Err(e) => report_failure("Error in generating build config", ".", e),
    }
}
