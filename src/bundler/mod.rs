//! Script package bundling.
//!
//! Turns a build configuration into a Debian archive:
//!
//! 1. [`metadata::buildcfg`](crate::metadata::buildcfg) decodes the `.spalcfg` file into a [`Bundle`]
//! 2. [`Layout`] derives the staging tree from the bundle and output directory
//! 3. [`Bundler::stage`] writes the tree, [`Bundler::package`] runs `dpkg --build`
//!
//! [`generator`] goes the other way and writes a `.spalcfg` file from loose
//! input files.

pub mod builder;
pub mod error;
pub mod generator;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{BundledArtifact, Bundler, calculate_sha256};
pub use error::{Context, Error, ErrorExt, Result};
pub use generator::{GenerateRequest, mk_bundle};
pub use platform::linux::debian::Dpkg;
pub use settings::{Bundle, Layout, PackageManager, resolve_install_dir, resolve_root};
