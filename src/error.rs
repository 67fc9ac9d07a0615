//! Top-level error types for the command line front-end.
//!
//! Bundler failures keep their own [`crate::bundler::Error`] with numeric
//! codes; this module wraps them together with argument errors.

use thiserror::Error;

/// Result type alias for command line operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all front-end operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Conflicting arguments
    #[error("Conflicting arguments: {arguments:?}")]
    ConflictingArguments {
        /// Arguments that conflict
        arguments: Vec<String>,
    },
}

impl BundlerError {
    /// Numeric code of the underlying failure, `-1` when it has none.
    pub fn code(&self) -> i32 {
        match self {
            BundlerError::Bundler(e) => e.code(),
            BundlerError::Cli(_) | BundlerError::Io(_) => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundler_errors_keep_their_code() {
        let err = BundlerError::from(crate::bundler::Error::SourceRootIsCwd);
        assert_eq!(err.code(), -8);
        assert_eq!(
            err.to_string(),
            "Source root cannot be same as current working directory."
        );
    }

    #[test]
    fn cli_errors_have_generic_code() {
        let err = BundlerError::from(CliError::MissingArgument {
            argument: "--pkgmgr".into(),
        });
        assert_eq!(err.code(), -1);
        assert_eq!(
            err.to_string(),
            "CLI error: Missing required argument: --pkgmgr"
        );
    }
}
