//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the staging
//! steps, the packaging tool and the optional post-processing.

use crate::bundler::{
    Bundle, BundledArtifact, Layout,
    error::{ErrorExt, Result},
    platform::linux::{
        debian::{self, Dpkg},
        staging::STEPS,
    },
    utils::fs,
};
use std::path::{Path, PathBuf};

use super::checksum::calculate_sha256;

/// Main bundler orchestrator.
///
/// Owns a decoded bundle and the output directory. The three phases are
/// exposed separately so callers can tell staging failures from packaging
/// failures:
///
/// 1. [`stage`](Self::stage) builds the staging tree
/// 2. [`package`](Self::package) runs the packaging tool on it
/// 3. [`clean`](Self::clean) removes the staging tree
///
/// # Examples
///
/// ```no_run
/// use spal::bundler::{Bundler, Dpkg};
///
/// # fn example() -> spal::bundler::Result<()> {
/// let bundler = Bundler::from_buildcfg("foo.apt.stable.main.spalcfg".as_ref(), "dist")?;
/// let layout = bundler.stage()?;
/// let artifact = bundler.package(&layout, &Dpkg::default(), true)?;
/// bundler.clean(&layout)?;
/// println!("{} ({} bytes)", artifact.path.display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bundler {
    bundle: Bundle,
    out_dir: PathBuf,
}

impl Bundler {
    /// Creates a bundler staging into `out_dir`.
    pub fn new(bundle: Bundle, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle,
            out_dir: out_dir.into(),
        }
    }

    /// Loads a `.spalcfg` file and creates a bundler for it.
    pub fn from_buildcfg(path: &Path, out_dir: impl Into<PathBuf>) -> Result<Self> {
        let bundle = crate::metadata::buildcfg::load(path)?;
        Ok(Self::new(bundle, out_dir))
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Resolves the staging layout without touching the filesystem.
    pub fn layout(&self) -> Result<Layout> {
        Layout::resolve(&self.bundle, &self.out_dir)
    }

    /// Runs every staging step in order, stopping at the first failure.
    ///
    /// Files written by steps that already succeeded are left in place.
    pub fn stage(&self) -> Result<Layout> {
        for (name, step) in STEPS {
            log::debug!("Staging step: {name}");
            step(&self.bundle, &self.out_dir)?;
        }
        let layout = self.layout()?;
        log::info!("Staged {}", layout.root_dir().display());
        Ok(layout)
    }

    /// Builds the archive from a staged tree.
    ///
    /// With `use_deb_std_name` the archive is moved to
    /// `<out_dir>/<pkgmgr>.<dist>.<comp>/<package>_<version>_all.deb`.
    pub fn package(
        &self,
        layout: &Layout,
        packager: &Dpkg,
        use_deb_std_name: bool,
    ) -> Result<BundledArtifact> {
        let mut path = packager.build(layout)?;
        if use_deb_std_name {
            path = debian::relocate_to_std_name(layout, &path)?;
        }

        let size = std::fs::metadata(&path)
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path)?;
        log::info!("✓ Created {} ({} bytes)", path.display(), size);
        log::info!("  SHA256: {}", checksum);

        Ok(BundledArtifact {
            path,
            size,
            checksum,
        })
    }

    /// Removes the staging tree.
    pub fn clean(&self, layout: &Layout) -> Result<()> {
        log::debug!("Removing build tree {}", layout.root_dir().display());
        fs::remove_dir_all(layout.root_dir())
    }
}
