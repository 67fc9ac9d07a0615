//! File system utilities for staging.
//!
//! Blocking helpers with idempotent directory handling, Unix permission
//! control and tree copies that merge into existing destinations.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    fs::{self, File, FileTimes},
    io,
    path::Path,
};

/// Permission bits for staged directories and executables.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Creates all of the directories of the specified path with mode 0755.
///
/// Pre-existing directories are not an error.
pub fn create_dir_all(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(EXECUTABLE_MODE);
    }
    builder.create(path).fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents).fs_context("writing file", path)
}

/// Sets `path` to mode 0755 on Unix.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
            .fs_context("setting permissions on", path)?;
    }
    Ok(())
}

/// Copies a regular file, preserving permissions and access/modification times.
///
/// Fails if the source path is a directory or doesn't exist.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::FileNotFound {
            kind: "Source file",
            path: from.to_path_buf(),
        });
    }
    fs::copy(from, to).fs_context("copying file to", to)?;

    let metadata = fs::metadata(from).fs_context("reading metadata of", from)?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    File::open(to)
        .and_then(|file| file.set_times(times))
        .fs_context("setting file times on", to)
}

/// Recursively copies a directory, merging into `to` if it already exists.
///
/// Files already present at the destination are overwritten; symlinks are
/// recreated rather than followed.
pub fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::FileNotFound {
            kind: "Source directory",
            path: from.to_path_buf(),
        });
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            copy_symlink(entry.path(), &dest_path)?;
        } else if entry.file_type().is_dir() {
            create_dir_all(&dest_path)?;
        } else {
            copy_file(entry.path(), &dest_path)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src).fs_context("reading symlink", src)?;
    if fs::symlink_metadata(dst).is_ok() {
        fs::remove_file(dst).fs_context("replacing symlink", dst)?;
    }
    std::os::unix::fs::symlink(&target, dst).fs_context("creating symlink", dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    if src.is_dir() {
        copy_dir(src, dst)
    } else {
        copy_file(src, dst)
    }
}
