//! Build configuration generation from discrete input files.
//!
//! The generator is the inverse of [`buildcfg::load`]: it reads a shell
//! script, a control file and the optional man page, copyright notice and
//! source root, and writes them as one `.spalcfg` file.

use crate::{
    bundler::{
        Bundle, Error,
        error::{ErrorExt, Result},
        utils::fs,
    },
    metadata::buildcfg::{self, EXTENSION},
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Inputs for one generated build configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Script installed as the package executable
    pub shell_script: PathBuf,

    /// Control file
    pub control: PathBuf,

    /// Package manager token, written unchecked
    pub package_manager: String,

    pub distribution: String,

    pub component: String,

    /// Directory whose direct children become the bundled sources
    pub source_root: Option<PathBuf>,

    /// File names inside `source_root` to leave out
    pub exclude: Vec<String>,

    pub man: Option<PathBuf>,

    pub copyright: Option<PathBuf>,

    /// Explicit output name; `.spalcfg` is appended when missing
    pub outfile: Option<String>,
}

impl GenerateRequest {
    /// Name of the file [`mk_bundle`] writes.
    ///
    /// Defaults to `<script>.<pkgmgr>.<dist>.<comp>.spalcfg` in the current
    /// directory.
    pub fn output_file(&self) -> PathBuf {
        let suffix = format!(".{EXTENSION}");
        match &self.outfile {
            Some(name) if name.ends_with(&suffix) => PathBuf::from(name),
            Some(name) => PathBuf::from(format!("{name}{suffix}")),
            None => {
                let script = self
                    .shell_script
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                PathBuf::from(format!(
                    "{script}.{}.{}.{}{suffix}",
                    self.package_manager, self.distribution, self.component
                ))
            }
        }
    }
}

/// Validates the request, encodes the inputs and writes the build
/// configuration. Returns the path written.
///
/// Checks run in this order and nothing is written when one fails: script
/// exists, control file exists, source root exists, source root is not the
/// working directory, exclusions come with a source root, man page exists,
/// copyright notice exists.
pub fn mk_bundle(req: &GenerateRequest) -> Result<PathBuf> {
    require_file("File", &req.shell_script)?;
    require_file("File", &req.control)?;
    match &req.source_root {
        Some(root) => {
            if !root.is_dir() {
                return Err(Error::FileNotFound {
                    kind: "Source root",
                    path: root.clone(),
                });
            }
            if is_current_dir(root)? {
                return Err(Error::SourceRootIsCwd);
            }
        }
        None if !req.exclude.is_empty() => return Err(Error::SourceRootUnspecified),
        None => {}
    }
    if let Some(man) = &req.man {
        require_file("Man file", man)?;
    }
    if let Some(copyright) = &req.copyright {
        require_file("Copyright file", copyright)?;
    }

    let bundle = Bundle {
        package_manager: req.package_manager.clone(),
        distribution: req.distribution.clone(),
        component: req.component.clone(),
        wrapper_script: read_text(&req.shell_script)?,
        sources: match &req.source_root {
            Some(root) => list_sources(root, &req.exclude)?,
            None => Vec::new(),
        },
        control: read_text(&req.control)?,
        man: req.man.as_deref().map(read_text).transpose()?,
        copyright: req.copyright.as_deref().map(read_text).transpose()?,
    };

    let output = req.output_file();
    fs::write_file(&output, buildcfg::encode(&bundle))?;
    log::info!(
        "Wrote build configuration {} ({} sources)",
        output.display(),
        bundle.sources.len()
    );
    Ok(output)
}

fn require_file(kind: &'static str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).fs_context("reading", path)
}

fn is_current_dir(path: &Path) -> Result<bool> {
    let cwd = std::env::current_dir().fs_context("reading current directory", path)?;
    let absolute = path.absolutize().fs_context("resolving", path)?;
    if absolute.as_ref() == cwd.as_path() {
        return Ok(true);
    }
    Ok(std::fs::canonicalize(path).is_ok_and(|canonical| canonical == cwd))
}

/// Direct children of `root` not named in `exclude`, sorted by file name.
fn list_sources(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();
        if exclude.iter().any(|excluded| **excluded == *name) {
            log::debug!("Excluding {}", entry.path().display());
            continue;
        }
        sources.push(root.join(entry.file_name()));
    }
    Ok(sources)
}
