//! spal: Scripts Package Assembler for Linux.
//!
//! Assembles executable shell scripts, their supporting files, a man page
//! and a copyright notice into `.deb` packages for `apt` or Termux `pkg`.
//!
//! The inputs travel as a single `.spalcfg` build configuration, which the
//! [`bundler::generator`] writes and [`metadata::buildcfg`] reads back.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
