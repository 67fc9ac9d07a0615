//! The decoded form of a build configuration.

use std::path::PathBuf;

/// Everything needed to stage one script package.
///
/// A `Bundle` is produced by [`crate::metadata::buildcfg::decode`] and
/// consumed by the staging steps. Nothing is validated on construction: the
/// package manager token and the control block are checked when a
/// [`Layout`](super::Layout) is resolved.
///
/// # Examples
///
/// ```
/// use spal::bundler::Bundle;
///
/// let bundle = Bundle {
///     package_manager: "apt".into(),
///     distribution: "stable".into(),
///     component: "main".into(),
///     wrapper_script: "#!/bin/sh\necho hello\n".into(),
///     control: "Package: hello\nVersion: 1.0\n".into(),
///     ..Default::default()
/// };
/// assert!(bundle.sources.is_empty());
/// assert!(bundle.man.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    /// Package manager token as written in the file (e.g. `apt`).
    pub package_manager: String,

    /// Distribution label, used only in output names (e.g. `stable`).
    pub distribution: String,

    /// Component label, used only in output names (e.g. `main`).
    pub component: String,

    /// Script installed as the package's executable.
    pub wrapper_script: String,

    /// Files and directories installed under the package's library directory.
    ///
    /// Empty means no bundled source tree.
    pub sources: Vec<PathBuf>,

    /// Control block handed to the packaging tool.
    pub control: String,

    /// Manual page source, installed gzip-compressed.
    pub man: Option<String>,

    /// Copyright notice.
    pub copyright: Option<String>,
}
