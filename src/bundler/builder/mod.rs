//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that turns a
//! decoded [`Bundle`](crate::bundler::Bundle) into a `.deb` archive.
//!
//! # Overview
//!
//! The bundler:
//! 1. Resolves the staging [`Layout`](crate::bundler::Layout)
//! 2. Runs the staging steps in order
//! 3. Invokes the packaging tool on the staged tree
//! 4. Optionally moves the archive to its Debian-standard name
//! 5. Calculates size and checksum, returning a [`BundledArtifact`]
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`tool_detection`] - External tool availability checking

mod checksum;
mod orchestrator;
pub(crate) mod tool_detection;

use std::path::PathBuf;

pub use checksum::calculate_sha256;
pub use orchestrator::Bundler;

/// A package archive produced by the bundler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledArtifact {
    /// Final location of the archive
    pub path: PathBuf,

    /// Size in bytes
    pub size: u64,

    /// Hex-encoded SHA-256 of the archive
    pub checksum: String,
}
