//! External tool detection and availability checking.
//!
//! The packaging program is configurable, so it is looked up per run rather
//! than cached.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolves `program` to an executable, searching `PATH` for bare names.
///
/// Fails with [`Error::PackagerNotFound`] when nothing executable matches.
pub fn find_program(program: &Path) -> Result<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program.display(), path.display());
            Ok(path)
        }
        Err(e) => {
            log::warn!(
                "{} not found in PATH: {}. Install dpkg or point SPAL_DPKG at it.",
                program.display(),
                e
            );
            Err(Error::PackagerNotFound {
                program: program.display().to_string(),
                reason: e.to_string(),
            })
        }
    }
}
