//! Staging steps that expand a bundle into a package tree.
//!
//! Each step takes the bundle and the output directory and resolves the
//! [`Layout`] itself, so a step run on its own still rejects an invalid
//! bundle. Steps are idempotent but not transactional: files written by an
//! earlier step stay on disk when a later one fails.

use crate::bundler::{
    Bundle, Layout,
    error::{Context, ErrorExt, Result},
    utils::fs,
};
use flate2::{Compression, GzBuilder};
use std::{
    io::{BufWriter, Write},
    path::Path,
};

/// Signature shared by all staging steps.
pub type Step = fn(&Bundle, &Path) -> Result<()>;

/// Staging steps in execution order, paired with the names used in logs.
pub const STEPS: [(&str, Step); 6] = [
    ("create tree", create_tree),
    ("write control", write_control),
    ("write copyright", write_copyright),
    ("write wrapper", write_wrapper),
    ("write man page", write_man),
    ("copy sources", copy_sources),
];

/// Creates the directory skeleton.
///
/// `DEBIAN` and `bin` always exist afterwards. The library, doc and man
/// directories are only created when the bundle has sources, a copyright
/// notice and a man page respectively.
pub fn create_tree(bundle: &Bundle, out_dir: &Path) -> Result<()> {
    let layout = Layout::resolve(bundle, out_dir)?;

    fs::create_dir_all(&layout.control_dir())?;
    fs::create_dir_all(&layout.bin_dir())?;
    if !bundle.sources.is_empty() {
        fs::create_dir_all(&layout.lib_dir())?;
    }
    if bundle.copyright.is_some() {
        fs::create_dir_all(&layout.doc_dir())?;
    }
    if bundle.man.is_some() {
        fs::create_dir_all(&layout.man_dir())?;
    }
    Ok(())
}

/// Writes the control block verbatim to `DEBIAN/control`.
pub fn write_control(bundle: &Bundle, out_dir: &Path) -> Result<()> {
    let layout = Layout::resolve(bundle, out_dir)?;
    fs::write_file(&layout.control_file(), &bundle.control)
}

/// Writes the copyright notice. Does nothing when the bundle has none or the
/// doc directory was not created.
pub fn write_copyright(bundle: &Bundle, out_dir: &Path) -> Result<()> {
    let layout = Layout::resolve(bundle, out_dir)?;
    let Some(copyright) = bundle.copyright.as_deref() else {
        log::debug!("No copyright notice for {}", layout.package());
        return Ok(());
    };
    if !layout.doc_dir().is_dir() {
        return Ok(());
    }
    fs::write_file(&layout.copyright_file(), copyright)
}

/// Installs the wrapper script as `bin/<package>` with mode 0755.
pub fn write_wrapper(bundle: &Bundle, out_dir: &Path) -> Result<()> {
    let layout = Layout::resolve(bundle, out_dir)?;
    let wrapper = layout.wrapper_file();
    fs::write_file(&wrapper, &bundle.wrapper_script)?;
    fs::make_executable(&wrapper)
}

/// Writes `man1/<package>.1.gz`. Does nothing when the bundle has no man page
/// or the man directory was not created.
///
/// The archive uses the best compression level and a zero timestamp so the
/// output bytes only depend on the man page text.
pub fn write_man(bundle: &Bundle, out_dir: &Path) -> Result<()> {
    let layout = Layout::resolve(bundle, out_dir)?;
    let Some(man) = bundle.man.as_deref() else {
        log::debug!("No man page for {}", layout.package());
        return Ok(());
    };
    if !layout.man_dir().is_dir() {
        return Ok(());
    }

    let man_file = layout.man_file();
    let file = std::fs::File::create(&man_file).fs_context("creating man page", &man_file)?;
    let mut encoder = GzBuilder::new()
        .filename(layout.man_page_name())
        .mtime(0)
        .write(BufWriter::new(file), Compression::best());
    encoder
        .write_all(man.as_bytes())
        .fs_context("compressing man page", &man_file)?;
    encoder
        .finish()
        .and_then(|mut writer| writer.flush())
        .fs_context("writing man page", &man_file)
}

/// Copies every source into `lib/<package>/<basename>`.
///
/// Directories are copied recursively and merged into an existing
/// destination; files keep their permissions and timestamps.
pub fn copy_sources(bundle: &Bundle, out_dir: &Path) -> Result<()> {
    if bundle.sources.is_empty() {
        return Ok(());
    }
    let layout = Layout::resolve(bundle, out_dir)?;
    let lib_dir = layout.lib_dir();

    for source in &bundle.sources {
        let name = source
            .file_name()
            .context(format!("source path {} has no file name", source.display()))?;
        let dest = lib_dir.join(name);
        log::debug!("Copying {} to {}", source.display(), dest.display());
        if source.is_dir() {
            fs::copy_dir(source, &dest)?;
        } else {
            fs::copy_file(source, &dest)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Error;
    use flate2::read::GzDecoder;
    use std::{fs as stdfs, io::Read, path::PathBuf};

    fn bundle() -> Bundle {
        Bundle {
            package_manager: "apt".into(),
            distribution: "stable".into(),
            component: "main".into(),
            wrapper_script: "#!/bin/sh\necho foo\n".into(),
            control: "Package: foo\nVersion: 1.0\nArchitecture: all\n".into(),
            ..Default::default()
        }
    }

    fn run_all(bundle: &Bundle, out_dir: &Path) {
        for (name, step) in STEPS {
            step(bundle, out_dir).unwrap_or_else(|e| panic!("{name} failed: {e}"));
        }
    }

    #[test]
    fn minimal_bundle_creates_only_debian_and_bin() {
        let out = tempfile::tempdir().unwrap();
        let bundle = bundle();
        run_all(&bundle, out.path());

        let root = out.path().join("foo_1.0_all.apt.stable.main");
        let mut top: Vec<_> = stdfs::read_dir(&root)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        top.sort();
        assert_eq!(top, ["DEBIAN", "usr"]);
        let usr: Vec<_> = stdfs::read_dir(root.join("usr"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(usr, ["bin"]);
        assert_eq!(
            stdfs::read_to_string(root.join("DEBIAN/control")).unwrap(),
            bundle.control
        );
        assert_eq!(
            stdfs::read_to_string(root.join("usr/bin/foo")).unwrap(),
            bundle.wrapper_script
        );
    }

    #[test]
    fn absent_man_and_copyright_leave_no_directories() {
        let out = tempfile::tempdir().unwrap();
        let bundle = bundle();
        create_tree(&bundle, out.path()).unwrap();
        write_copyright(&bundle, out.path()).unwrap();
        write_man(&bundle, out.path()).unwrap();

        let usr = out.path().join("foo_1.0_all.apt.stable.main/usr");
        assert!(!usr.join("share/doc/foo").exists());
        assert!(!usr.join("share/man/man1").exists());
        assert!(!usr.join("share").exists());
    }

    #[cfg(unix)]
    #[test]
    fn wrapper_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let out = tempfile::tempdir().unwrap();
        let bundle = bundle();
        create_tree(&bundle, out.path()).unwrap();
        write_wrapper(&bundle, out.path()).unwrap();

        let wrapper = out.path().join("foo_1.0_all.apt.stable.main/usr/bin/foo");
        let mode = stdfs::metadata(wrapper).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn copyright_is_written_under_doc_dir() {
        let out = tempfile::tempdir().unwrap();
        let bundle = Bundle {
            copyright: Some("Copyright 2025 Jane Doe\n".into()),
            ..bundle()
        };
        run_all(&bundle, out.path());
        let copyright = out
            .path()
            .join("foo_1.0_all.apt.stable.main/usr/share/doc/foo/copyright");
        assert_eq!(
            stdfs::read_to_string(copyright).unwrap(),
            "Copyright 2025 Jane Doe\n"
        );
    }

    #[test]
    fn man_page_is_reproducible_gzip() {
        let out = tempfile::tempdir().unwrap();
        let bundle = Bundle {
            man: Some(".TH FOO 1\n.SH NAME\nfoo \\- demo\n".into()),
            ..bundle()
        };
        run_all(&bundle, out.path());

        let gz_path = out
            .path()
            .join("foo_1.0_all.apt.stable.main/usr/share/man/man1/foo.1.gz");
        let first = stdfs::read(&gz_path).unwrap();
        // MTIME field of the gzip header
        assert_eq!(&first[4..8], &[0, 0, 0, 0]);

        let mut text = String::new();
        let mut decoder = GzDecoder::new(first.as_slice());
        decoder.read_to_string(&mut text).unwrap();
        assert_eq!(Some(text.as_str()), bundle.man.as_deref());
        assert_eq!(
            decoder.header().and_then(|h| h.filename()),
            Some(&b"foo.1"[..])
        );

        write_man(&bundle, out.path()).unwrap();
        assert_eq!(stdfs::read(&gz_path).unwrap(), first);
    }

    #[test]
    fn rebuild_without_man_or_copyright_keeps_earlier_files() {
        let out = tempfile::tempdir().unwrap();
        let first = Bundle {
            man: Some(".TH FOO 1\n".into()),
            copyright: Some("Copyright 2025 Jane Doe\n".into()),
            ..bundle()
        };
        run_all(&first, out.path());

        let usr = out.path().join("foo_1.0_all.apt.stable.main/usr");
        let copyright = usr.join("share/doc/foo/copyright");
        let man = usr.join("share/man/man1/foo.1.gz");
        let man_bytes = stdfs::read(&man).unwrap();

        run_all(&bundle(), out.path());
        assert_eq!(
            stdfs::read_to_string(&copyright).unwrap(),
            "Copyright 2025 Jane Doe\n"
        );
        assert_eq!(stdfs::read(&man).unwrap(), man_bytes);
    }

    #[test]
    fn sources_are_copied_by_basename() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let script = src.path().join("main.sh");
        let tree = src.path().join("modules");
        stdfs::write(&script, "echo main\n").unwrap();
        stdfs::create_dir_all(tree.join("net")).unwrap();
        stdfs::write(tree.join("net/http.sh"), "echo http\n").unwrap();

        let bundle = Bundle {
            sources: vec![script.clone(), tree.clone()],
            ..bundle()
        };
        run_all(&bundle, out.path());

        let lib = out.path().join("foo_1.0_all.apt.stable.main/usr/lib/foo");
        assert_eq!(stdfs::read_to_string(lib.join("main.sh")).unwrap(), "echo main\n");
        assert_eq!(
            stdfs::read_to_string(lib.join("modules/net/http.sh")).unwrap(),
            "echo http\n"
        );

        // A second run merges into the existing tree.
        copy_sources(&bundle, out.path()).unwrap();
        assert!(lib.join("modules/net/http.sh").is_file());
    }

    #[test]
    fn missing_source_is_reported() {
        let out = tempfile::tempdir().unwrap();
        let missing = out.path().join("nope.sh");
        let bundle = Bundle {
            sources: vec![missing.clone()],
            ..bundle()
        };
        create_tree(&bundle, out.path()).unwrap();
        match copy_sources(&bundle, out.path()) {
            Err(Error::FileNotFound { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_sources_skip_layout_resolution() {
        let out = tempfile::tempdir().unwrap();
        let bundle = Bundle {
            package_manager: "yum".into(),
            ..bundle()
        };
        copy_sources(&bundle, out.path()).unwrap();
    }

    #[test]
    fn every_step_validates_the_bundle() {
        let out = tempfile::tempdir().unwrap();
        let bundle = Bundle {
            package_manager: "portage".into(),
            sources: vec![PathBuf::from("whatever")],
            ..bundle()
        };
        for (name, step) in STEPS {
            assert!(
                matches!(
                    step(&bundle, out.path()),
                    Err(Error::UnsupportedPackageManager(_))
                ),
                "{name} accepted an unsupported package manager"
            );
        }
        assert_eq!(stdfs::read_dir(out.path()).unwrap().count(), 0);
    }
}
