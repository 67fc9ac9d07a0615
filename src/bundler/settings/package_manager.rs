//! Supported package managers and their install prefixes.

use crate::bundler::Error;
use std::{fmt, str::FromStr};

/// Package manager whose filesystem layout the staging tree follows.
///
/// The token written in a build configuration (`apt`, `pkg`) selects where
/// the package installs its files relative to the filesystem root.
///
/// # Examples
///
/// ```
/// use spal::bundler::PackageManager;
///
/// let pm: PackageManager = "pkg".parse().unwrap();
/// assert_eq!(pm.usr_prefix(), "data/data/com.termux/files/usr");
/// assert!("yum".parse::<PackageManager>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PackageManager {
    /// Debian, Ubuntu and derivatives - installs under `/usr`
    Apt,
    /// Termux on Android - installs under the app-private prefix
    Pkg,
}

impl PackageManager {
    /// Every supported package manager, in help-text order.
    pub const ALL: [PackageManager; 2] = [PackageManager::Apt, PackageManager::Pkg];

    /// Token used in build configurations and output names.
    pub const fn as_str(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Pkg => "pkg",
        }
    }

    /// Install prefix relative to the package root.
    pub const fn usr_prefix(self) -> &'static str {
        match self {
            PackageManager::Apt => "usr",
            PackageManager::Pkg => "data/data/com.termux/files/usr",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.as_str() == token)
            .ok_or_else(|| Error::UnsupportedPackageManager(token.to_string()))
    }
}
