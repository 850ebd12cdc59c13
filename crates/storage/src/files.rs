// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem helpers for resource trees and atomic writes.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::RepositoryError;

/// Parse a resource path supplied by a caller or an archive.
///
/// Must be relative, non-empty and free of `..`; `.` components are dropped.
pub(crate) fn check_relative(path: &str) -> Result<PathBuf, RepositoryError> {
    let invalid = || RepositoryError::InvalidResourcePath(path.to_string());
    let mut clean = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid())
            }
        }
    }
    if clean.as_os_str().is_empty() {
        return Err(invalid());
    }
    Ok(clean)
}

/// Copy regular files and directories from `src` into `dst`.
///
/// Symlinks and special files are skipped. Returns the number of files copied.
pub(crate) fn copy_tree(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let target = dst.join(entry.file_name());
        if file_type.is_dir() {
            copied += copy_tree(&entry.path(), &target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping non-regular resource");
        }
    }
    Ok(copied)
}

/// Relative paths (`/`-separated) of every regular file under `dir`, sorted.
///
/// A missing directory has no files.
pub(crate) fn list_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut files = Vec::new();
    if dir.is_dir() {
        collect(dir, "", &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn collect(dir: &Path, prefix: &str, files: &mut Vec<String>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel = if prefix.is_empty() { name } else { format!("{prefix}/{name}") };
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect(&entry.path(), &rel, files)?;
        } else if file_type.is_file() {
            files.push(rel);
        }
    }
    Ok(())
}

/// Write through a uniquely named sibling temp file and rename over the target.
///
/// The temp name never collides with another file in the directory, so
/// neighbours such as `<name>.tmp` are left alone.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Remove a file and any directories it leaves empty, up to (not including) `root`.
pub(crate) fn remove_and_prune(root: &Path, path: &Path) -> io::Result<()> {
    fs::remove_file(path)?;
    let mut dir = path.parent();
    while let Some(d) = dir {
        if d == root || !d.starts_with(root) {
            break;
        }
        if fs::remove_dir(d).is_err() {
            break;
        }
        dir = d.parent();
    }
    Ok(())
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
