//! Staging tree layout derived from a bundle and an output directory.

use super::{Bundle, PackageManager};
use crate::{bundler::Result, metadata::PackageMetadata};
use std::path::{Path, PathBuf};

/// Paths of a package staging tree.
///
/// A layout is cheap to derive and is never cached between staging steps:
/// each step resolves it again, so every step validates the bundle on its
/// own.
///
/// ```text
/// <out_dir>/<package>_<version>_all.<pkgmgr>.<dist>.<comp>/    root_dir
/// ├── DEBIAN/control
/// └── <usr-prefix>/                                           install_dir
///     ├── bin/<package>
///     ├── lib/<package>/...
///     └── share/
///         ├── doc/<package>/copyright
///         └── man/man1/<package>.1.gz
/// ```
///
/// # Examples
///
/// ```
/// use spal::bundler::{Bundle, Layout};
/// use std::path::Path;
///
/// let bundle = Bundle {
///     package_manager: "apt".into(),
///     distribution: "stable".into(),
///     component: "main".into(),
///     control: "Package: foo\nVersion: 1.0\n".into(),
///     ..Default::default()
/// };
/// let layout = Layout::resolve(&bundle, Path::new("out")).unwrap();
/// assert_eq!(layout.root_dir(), Path::new("out/foo_1.0_all.apt.stable.main"));
/// assert_eq!(layout.install_dir(), Path::new("out/foo_1.0_all.apt.stable.main/usr"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    root_dir: PathBuf,
    install_dir: PathBuf,
    package: String,
    version: String,
    package_manager: PackageManager,
    distribution: String,
    component: String,
}

impl Layout {
    /// Derives the layout.
    ///
    /// Fails with [`UnsupportedPackageManager`](crate::bundler::Error::UnsupportedPackageManager)
    /// before looking at the control block, then with whatever the control
    /// block extraction reports.
    pub fn resolve(bundle: &Bundle, out_dir: &Path) -> Result<Self> {
        let package_manager: PackageManager = bundle.package_manager.parse()?;
        let PackageMetadata { name, version } = PackageMetadata::from_control(&bundle.control)?;

        let root_dir = out_dir.join(format!(
            "{name}_{version}_all.{package_manager}.{}.{}",
            bundle.distribution, bundle.component
        ));
        let install_dir = root_dir.join(package_manager.usr_prefix());

        Ok(Self {
            root_dir,
            install_dir,
            package: name,
            version,
            package_manager,
            distribution: bundle.distribution.clone(),
            component: bundle.component.clone(),
        })
    }

    /// Root of the staging tree; the packaging tool is run on this directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Install prefix inside the root.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Package name from the control block.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Version from the control block.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    /// Package metadata directory.
    pub fn control_dir(&self) -> PathBuf {
        self.root_dir.join("DEBIAN")
    }

    pub fn control_file(&self) -> PathBuf {
        self.control_dir().join("control")
    }

    /// Directory holding the wrapper script.
    pub fn bin_dir(&self) -> PathBuf {
        self.install_dir.join("bin")
    }

    pub fn wrapper_file(&self) -> PathBuf {
        self.bin_dir().join(&self.package)
    }

    /// Private library directory receiving the bundled sources.
    pub fn lib_dir(&self) -> PathBuf {
        self.install_dir.join("lib").join(&self.package)
    }

    pub fn doc_dir(&self) -> PathBuf {
        self.install_dir.join("share").join("doc").join(&self.package)
    }

    pub fn copyright_file(&self) -> PathBuf {
        self.doc_dir().join("copyright")
    }

    /// Section 1 manual page directory.
    pub fn man_dir(&self) -> PathBuf {
        self.install_dir.join("share").join("man").join("man1")
    }

    /// Uncompressed man page name, as embedded in the gzip header.
    pub fn man_page_name(&self) -> String {
        format!("{}.1", self.package)
    }

    pub fn man_file(&self) -> PathBuf {
        self.man_dir().join(format!("{}.gz", self.man_page_name()))
    }

    /// Archive written by the packaging tool next to the root directory.
    pub fn archive_file(&self) -> PathBuf {
        let mut archive = self.root_dir.clone().into_os_string();
        archive.push(".deb");
        PathBuf::from(archive)
    }

    /// Debian-standard archive location:
    /// `<out_dir>/<pkgmgr>.<dist>.<comp>/<package>_<version>_all.deb`.
    pub fn deb_std_archive_file(&self) -> PathBuf {
        let out_dir = self.root_dir.parent().unwrap_or_else(|| Path::new(""));
        out_dir
            .join(format!(
                "{}.{}.{}",
                self.package_manager, self.distribution, self.component
            ))
            .join(format!("{}_{}_all.deb", self.package, self.version))
    }
}

/// Root directory of the staging tree for `bundle` under `out_dir`.
pub fn resolve_root(bundle: &Bundle, out_dir: &Path) -> Result<PathBuf> {
    Layout::resolve(bundle, out_dir).map(|layout| layout.root_dir)
}

/// Install prefix of the staging tree; fails exactly like [`resolve_root`].
pub fn resolve_install_dir(bundle: &Bundle, out_dir: &Path) -> Result<PathBuf> {
    Layout::resolve(bundle, out_dir).map(|layout| layout.install_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Error;

    fn bundle(package_manager: &str, control: &str) -> Bundle {
        Bundle {
            package_manager: package_manager.into(),
            distribution: "stable".into(),
            component: "main".into(),
            control: control.into(),
            ..Default::default()
        }
    }

    #[test]
    fn apt_root_and_install_dir() {
        let b = bundle("apt", "Package: foo\nVersion: 1.0\n");
        let out = Path::new("/tmp/out");
        assert_eq!(
            resolve_root(&b, out).unwrap(),
            Path::new("/tmp/out/foo_1.0_all.apt.stable.main")
        );
        assert_eq!(
            resolve_install_dir(&b, out).unwrap(),
            Path::new("/tmp/out/foo_1.0_all.apt.stable.main/usr")
        );
    }

    #[test]
    fn pkg_installs_under_termux_prefix() {
        let b = bundle("pkg", "Package: foo\nVersion: 2.0\n");
        let layout = Layout::resolve(&b, Path::new("out")).unwrap();
        assert_eq!(
            layout.install_dir(),
            Path::new("out/foo_2.0_all.pkg.stable.main/data/data/com.termux/files/usr")
        );
        assert_eq!(
            layout.wrapper_file(),
            layout.install_dir().join("bin").join("foo")
        );
    }

    #[test]
    fn unsupported_package_manager_wins_over_bad_control() {
        for control in ["Package: foo\nVersion: 1.0\n", "", "Version: 1.0\n"] {
            match resolve_root(&bundle("yum", control), Path::new("out")) {
                Err(Error::UnsupportedPackageManager(token)) => assert_eq!(token, "yum"),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn control_errors_propagate_unchanged() {
        let out = Path::new("out");
        assert!(matches!(
            resolve_root(&bundle("apt", "Version: 1.0\n"), out),
            Err(Error::NoPackageName)
        ));
        assert!(matches!(
            resolve_install_dir(&bundle("apt", "Package: foo\n"), out),
            Err(Error::NoVersionString)
        ));
    }

    #[test]
    fn fixed_paths() {
        let b = bundle("apt", "Package: foo\nVersion: 1.0\n");
        let layout = Layout::resolve(&b, Path::new("out")).unwrap();
        let root = Path::new("out/foo_1.0_all.apt.stable.main");
        assert_eq!(layout.control_file(), root.join("DEBIAN/control"));
        assert_eq!(layout.lib_dir(), root.join("usr/lib/foo"));
        assert_eq!(layout.copyright_file(), root.join("usr/share/doc/foo/copyright"));
        assert_eq!(layout.man_file(), root.join("usr/share/man/man1/foo.1.gz"));
        assert_eq!(
            layout.archive_file(),
            Path::new("out/foo_1.0_all.apt.stable.main.deb")
        );
        assert_eq!(
            layout.deb_std_archive_file(),
            Path::new("out/apt.stable.main/foo_1.0_all.deb")
        );
    }
}
