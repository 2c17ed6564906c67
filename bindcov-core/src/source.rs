//! Binding corpus loading and reference lookup.
//!
//! A pass reads the binding files directly inside one directory; nested
//! directories belong to other modules and are not descended. Files are
//! read in parallel and concatenated in file-name order.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{BindcovError, BindcovResult};
use crate::headers::is_file_like;

/// Concatenated text of every binding file in one directory.
#[derive(Debug, Clone, Default)]
pub struct BindingSource {
    root: PathBuf,
    text: String,
    files: usize,
}

impl BindingSource {
    /// Read every `*.<extension>` file directly under `root`.
    ///
    /// `module` only labels the error; `None` denotes the global pass.
    pub fn read(root: &Path, extension: &str, module: Option<&str>) -> BindcovResult<Self> {
        let files = gather_source_files(root, extension)
            .map_err(|e| BindcovError::unreadable_source(root, module, e.to_string()))?;

        let contents = files
            .par_iter()
            .map(|path| {
                fs::read(path).map_err(|e| {
                    BindcovError::unreadable_source(
                        root,
                        module,
                        format!("can't read source file \"{}\": {}", path.display(), e),
                    )
                })
            })
            .collect::<BindcovResult<Vec<_>>>()?;

        let text = contents
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes))
            .collect::<Vec<_>>()
            .join("\n");

        tracing::debug!(root = %root.display(), files = files.len(), "read binding source");

        Ok(Self {
            root: root.to_path_buf(),
            text,
            files: files.len(),
        })
    }

    /// Binding source held in memory, for hosts that assemble it themselves.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            root: PathBuf::new(),
            text: text.into(),
            files: 1,
        }
    }

    /// True when `marker` immediately followed by `name` occurs anywhere.
    ///
    /// Plain substring search: comments and string literals count too.
    pub fn references(&self, marker: &str, name: &str) -> bool {
        let mut needle = String::with_capacity(marker.len() + name.len());
        needle.push_str(marker);
        needle.push_str(name);
        self.text.contains(&needle)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_count(&self) -> usize {
        self.files
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Files with `extension` directly inside `root`, sorted by name.
fn gather_source_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if is_file_like(&entry) && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
