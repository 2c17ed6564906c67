//! Header discovery for the global pass.
//!
//! Walks the system header tree depth-first in file-name order, pruning
//! excluded directories (`internal` by default) before descending.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::BindcovError;

/// Directories skipped by default: private headers of the native library.
pub const DEFAULT_SKIP_DIRS: &[&str] = &["internal"];

/// Headers found under a root, plus the entries that could not be visited.
#[derive(Debug, Default)]
pub struct HeaderWalk {
    pub headers: Vec<PathBuf>,
    pub errors: Vec<BindcovError>,
}

#[inline]
fn is_skipped_dir(entry: &walkdir::DirEntry, skip: &HashSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| skip.contains(name))
}

/// Regular files and symlinks not resolving to a directory.
///
/// Dangling links count, so reading them later surfaces an error instead of
/// the header silently disappearing from the walk.
pub(crate) fn is_file_like(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && !entry.path().is_dir())
}

/// Gather every `*.<extension>` file under `root`.
///
/// Unvisitable entries are collected as errors; the walk carries on.
pub fn gather_headers(root: &Path, skip_dirs: &[String], extension: &str) -> HeaderWalk {
    let skip: HashSet<&str> = skip_dirs.iter().map(String::as_str).collect();
    let mut walk = HeaderWalk::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e, &skip))
    {
        match entry {
            Ok(e) => {
                let path = e.path();
                if is_file_like(&e) && path.extension().is_some_and(|ext| ext == extension) {
                    walk.headers.push(path.to_path_buf());
                }
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                walk.errors.push(BindcovError::unreadable_header(path, io));
            }
        }
    }

    walk
}
