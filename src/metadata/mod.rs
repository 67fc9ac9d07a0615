//! Package metadata from control blocks and build configuration files.
//!
//! The control block is free text handed to the packaging tool verbatim. The
//! bundler only needs two fields out of it: the package name and the
//! version, which together name the staging tree and the wrapper script.

pub mod buildcfg;

use crate::bundler::{Error, Result};

const PACKAGE_FIELD: &str = "Package:";
const VERSION_FIELD: &str = "Version:";

/// Package metadata extracted from a control block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Value of the last `Package:` line
    pub name: String,

    /// Value of the last `Version:` line
    pub version: String,
}

impl PackageMetadata {
    /// Extracts name and version, failing on the name first.
    pub fn from_control(control: &str) -> Result<Self> {
        Ok(Self {
            name: package_name(control)?,
            version: version(control)?,
        })
    }
}

/// Returns the package name declared by the control block.
///
/// When the field is repeated, the last occurrence wins.
pub fn package_name(control: &str) -> Result<String> {
    last_field(control, PACKAGE_FIELD).ok_or(Error::NoPackageName)
}

/// Returns the version declared by the control block.
///
/// When the field is repeated, the last occurrence wins.
pub fn version(control: &str) -> Result<String> {
    last_field(control, VERSION_FIELD).ok_or(Error::NoVersionString)
}

fn last_field(control: &str, prefix: &str) -> Option<String> {
    control
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(prefix))
        .last()
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
