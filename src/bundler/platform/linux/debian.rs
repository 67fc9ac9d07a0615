//! Debian archive creation through the system packaging tool.
//!
//! The staging tree is handed to `dpkg --build`, which writes
//! `<root_dir>.deb` next to the tree. The archive can then be moved to the
//! Debian-standard `<package>_<version>_all.deb` name.

use crate::{
    bail,
    bundler::{
        Error, Layout,
        builder::tool_detection::find_program,
        error::{ErrorExt, Result},
        utils::fs,
    },
};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// Packaging program used when none is configured.
pub const DEFAULT_PACKAGER: &str = "dpkg";

/// Handle on the external packaging program.
#[derive(Clone, Debug)]
pub struct Dpkg {
    program: PathBuf,
}

impl Default for Dpkg {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGER)
    }
}

impl Dpkg {
    /// Uses `program` (a bare name looked up on `PATH`, or a path).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Runs `<program> --build <root_dir>` and returns the archive path.
    ///
    /// Stdout and stderr are captured through separate pipes and joined
    /// stdout first; a non-zero exit fails with
    /// [`Error::ExternalToolFailed`] carrying that output.
    pub fn build(&self, layout: &Layout) -> Result<PathBuf> {
        let program = find_program(&self.program)?;
        let root_dir = layout.root_dir();
        log::info!(
            "Building {} with {}",
            root_dir.display(),
            program.display()
        );

        let output = Command::new(&program)
            .arg("--build")
            .arg(root_dir)
            .output()
            .fs_context("running packaging tool", &program)?;

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            log::debug!(
                "{} exited with {:?}",
                program.display(),
                output.status.code()
            );
            return Err(Error::ExternalToolFailed(captured));
        }
        if !captured.trim().is_empty() {
            log::debug!("{}", captured.trim_end());
        }

        let archive = layout.archive_file();
        if !archive.is_file() {
            bail!(
                "{} succeeded but {} was not created",
                program.display(),
                archive.display()
            );
        }
        Ok(archive)
    }
}

/// Moves `archive` to `<out_dir>/<pkgmgr>.<dist>.<comp>/<package>_<version>_all.deb`.
pub fn relocate_to_std_name(layout: &Layout, archive: &Path) -> Result<PathBuf> {
    let target = layout.deb_std_archive_file();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    std::fs::rename(archive, &target).fs_context("moving archive to", &target)?;
    log::debug!("Moved {} to {}", archive.display(), target.display());
    Ok(target)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bundler::Bundle;
    use std::fs as stdfs;

    fn layout(out_dir: &Path) -> Layout {
        let bundle = Bundle {
            package_manager: "apt".into(),
            distribution: "stable".into(),
            component: "main".into(),
            control: "Package: foo\nVersion: 1.0\n".into(),
            ..Default::default()
        };
        Layout::resolve(&bundle, out_dir).unwrap()
    }

    #[test]
    fn failing_tool_is_reported() {
        let out = tempfile::tempdir().unwrap();
        let result = Dpkg::new("false").build(&layout(out.path()));
        assert!(matches!(result, Err(Error::ExternalToolFailed(_))));
    }

    #[test]
    fn failure_carries_tool_stderr() {
        let out = tempfile::tempdir().unwrap();
        // `sh` rejects `--build` as an option and complains on stderr.
        match Dpkg::new("sh").build(&layout(out.path())) {
            Err(Error::ExternalToolFailed(output)) => {
                assert!(output.to_lowercase().contains("option"), "captured: {output:?}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_archive_after_success_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let result = Dpkg::new("true").build(&layout(out.path()));
        assert!(matches!(result, Err(Error::GenericError(_))));
    }

    #[test]
    fn archive_is_found_next_to_root() {
        let out = tempfile::tempdir().unwrap();
        let layout = layout(out.path());
        stdfs::write(layout.archive_file(), b"!<arch>\n").unwrap();
        assert_eq!(
            Dpkg::new("true").build(&layout).unwrap(),
            out.path().join("foo_1.0_all.apt.stable.main.deb")
        );
    }

    #[test]
    fn relocation_uses_debian_standard_name() {
        let out = tempfile::tempdir().unwrap();
        let layout = layout(out.path());
        let archive = layout.archive_file();
        stdfs::write(&archive, b"!<arch>\n").unwrap();

        let moved = relocate_to_std_name(&layout, &archive).unwrap();
        assert_eq!(moved, out.path().join("apt.stable.main/foo_1.0_all.deb"));
        assert!(moved.is_file());
        assert!(!archive.exists());
    }
}
