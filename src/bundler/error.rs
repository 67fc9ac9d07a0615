//! Error types for decoding, staging and packaging.
//!
//! Every bundler operation returns [`Result`]. The numeric codes returned by
//! [`Error::code`] are the ones printed by the command line front-end.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while generating, decoding, staging or packaging a bundle.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input path does not exist or is not of the expected type.
    ///
    /// `kind` names the input ("File", "Source root", "Man file", ...).
    #[error("{kind} \"{}\" not found.", .path.display())]
    FileNotFound {
        /// Which input was missing
        kind: &'static str,
        /// The offending path
        path: PathBuf,
    },

    /// The bundle names a package manager outside the supported set.
    #[error("Unsupported package manager \"{0}\".")]
    UnsupportedPackageManager(String),

    /// The control block has no usable `Package:` line.
    #[error("Control text has no package name")]
    NoPackageName,

    /// The control block has no usable `Version:` line.
    #[error("Control text has no version string")]
    NoVersionString,

    /// Exclusions were given without a source root.
    #[error("Attempted to exclude files without specifying source root.")]
    SourceRootUnspecified,

    /// The source root is the current working directory.
    #[error("Source root cannot be same as current working directory.")]
    SourceRootIsCwd,

    /// The packaging program could not be located.
    #[error("Packaging tool \"{program}\" not found: {reason}")]
    PackagerNotFound {
        /// Program name or path as configured
        program: String,
        /// Lookup failure
        reason: String,
    },

    /// The packaging program exited unsuccessfully.
    ///
    /// Carries its captured output: all of stdout, then all of stderr. The two
    /// streams are captured separately, so their lines are not interleaved.
    #[error("{0}")]
    ExternalToolFailed(String),

    /// Filesystem failure with the operation and path that caused it.
    #[error("error {context} {}: {source}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Directory traversal error.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix mismatch while mirroring a tree.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Numeric code shown to users alongside the message.
    pub fn code(&self) -> i32 {
        match self {
            Error::FileNotFound { .. } => -2,
            Error::UnsupportedPackageManager(_) => -3,
            Error::NoPackageName => -4,
            Error::NoVersionString => -5,
            Error::SourceRootUnspecified => -6,
            Error::PackagerNotFound { .. } | Error::ExternalToolFailed(_) => -7,
            Error::SourceRootIsCwd => -8,
            Error::Fs { .. }
            | Error::WalkDir(_)
            | Error::StripPrefix(_)
            | Error::GenericError(_) => -1,
        }
    }
}

/// Attaches filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps an I/O failure into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Converts an empty [`Option`] into a generic error.
pub trait Context<T> {
    /// Returns the contained value or an [`Error::GenericError`] with `msg`.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_error_kinds() {
        assert_eq!(
            Error::FileNotFound {
                kind: "File",
                path: PathBuf::from("x")
            }
            .code(),
            -2
        );
        assert_eq!(Error::UnsupportedPackageManager("yum".into()).code(), -3);
        assert_eq!(Error::NoPackageName.code(), -4);
        assert_eq!(Error::NoVersionString.code(), -5);
        assert_eq!(Error::SourceRootUnspecified.code(), -6);
        assert_eq!(Error::ExternalToolFailed(String::new()).code(), -7);
        assert_eq!(Error::SourceRootIsCwd.code(), -8);
    }

    #[test]
    fn file_not_found_names_kind_and_path() {
        let err = Error::FileNotFound {
            kind: "Man file",
            path: PathBuf::from("docs/foo.1"),
        };
        assert_eq!(err.to_string(), "Man file \"docs/foo.1\" not found.");
    }

    #[test]
    fn fs_context_wraps_io_error() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.fs_context("writing control file", "/tmp/x").unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
        assert_eq!(err.to_string(), "error writing control file /tmp/x: denied");
    }
}
