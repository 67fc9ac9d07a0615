//! Build mode: stage a build configuration and package it.

use super::report_failure;
use crate::{
    bundler::Bundler,
    cli::{BuildRequest, RuntimeConfig},
    error::Result,
};
use std::io::{self, Write};

/// Stages, packages and prints the archive path.
///
/// The staging tree is removed after a successful build unless
/// `keep_build_tree` is set. It is always kept after a failure.
pub fn build(req: &BuildRequest, config: &RuntimeConfig) -> Result<i32> {
    let staged = Bundler::from_buildcfg(&req.buildcfg, &req.out_dir)
        .and_then(|bundler| bundler.stage().map(|layout| (bundler, layout)));
    let (bundler, layout) = match staged {
        Ok(staged) => staged,
        Err(e) => {
            return report_failure("Error in pre-build process", "", e);
        }
    };

    let artifact = match bundler.package(&layout, config.packager(), req.use_deb_std_name) {
        Ok(artifact) => artifact,
        Err(e) => {
            return report_failure("Error in building package", ".", e);
        }
    };
    writeln!(io::stdout(), "{}", artifact.path.display())?;

    if req.keep_build_tree {
        return Ok(0);
    }
    if let Err(e) = bundler.clean(&layout) {
        // The archive exists, so this only leaves clutter behind.
        log::warn!("Could not remove build tree: {e}");
        writeln!(
            io::stderr(),
            "spal: Build tree {} was not removed: {e}",
            layout.root_dir().display()
        )?;
    }
    Ok(0)
}
