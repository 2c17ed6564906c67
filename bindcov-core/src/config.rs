//! Run configuration and loading from bindcov.toml.
//!
//! A run is driven by one immutable [`CoverageConfig`]. Defaults describe
//! the Allegro headers and the Go binding package; a `bindcov.toml` file
//! overrides any subset of them:
//!
//! ```toml
//! header_root = "/usr/include/allegro5"
//! package_root = "allegro"
//! marker = "C."
//! ignore = ["al_get_new_display_adapter"]
//!
//! [[modules]]
//! name = "ttf"
//! macro = "ALLEGRO_TTF_FUNC"
//! path = "font/ttf"
//! ```

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{BindcovError, BindcovResult, IoResultExt};
use crate::headers::DEFAULT_SKIP_DIRS;
use crate::ignore::IgnoreSet;
use crate::matcher::GLOBAL_MACRO;
use crate::module::{ModuleSpec, ModuleTable, DEFAULT_HEADER_PREFIX};

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "bindcov.toml";

/// System header directory of the native library.
pub const DEFAULT_HEADER_ROOT: &str = "/usr/include/allegro5";

/// Binding package root, relative to the working directory.
pub const DEFAULT_PACKAGE_ROOT: &str = "allegro";

/// Foreign-call marker of cgo bindings.
pub const DEFAULT_MARKER: &str = "C.";

/// Main configuration structure for bindcov.toml.
#[derive(Debug, Deserialize, Default)]
pub struct BindcovConfig {
    pub header_root: Option<PathBuf>,
    pub package_root: Option<PathBuf>,
    pub marker: Option<String>,
    pub source_extension: Option<String>,
    pub header_extension: Option<String>,
    pub header_prefix: Option<String>,
    pub global_macro: Option<String>,
    pub skip_dirs: Option<Vec<String>>,
    /// Replaces the default module table when present.
    pub modules: Option<Vec<ModuleSpec>>,
    /// Extra ignored function names.
    pub ignore: Option<Vec<String>>,
    /// Keep the built-in ignore list (default true).
    pub default_ignore: Option<bool>,
}

impl BindcovConfig {
    /// Make relative roots relative to `base` (the config file's directory).
    fn anchor_paths(&mut self, base: &Path) {
        for root in [&mut self.header_root, &mut self.package_root]
            .into_iter()
            .flatten()
        {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }
    }
}

/// Loads configuration from bindcov.toml in `root` if it exists.
pub fn load_config(root: &Path) -> BindcovResult<Option<BindcovConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Loads configuration from an explicit file.
pub fn load_config_file(path: &Path) -> BindcovResult<BindcovConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    let mut cfg: BindcovConfig = toml::from_str(&content)
        .map_err(|e| BindcovError::config(path, format!("Invalid {}: {}", CONFIG_FILE, e)))?;

    if let Some(base) = path.parent() {
        cfg.anchor_paths(base);
    }
    Ok(cfg)
}

/// Immutable configuration of one coverage run.
#[derive(Debug, Clone)]
pub struct CoverageConfig {
    pub header_root: PathBuf,
    pub package_root: PathBuf,
    pub marker: String,
    pub source_extension: String,
    pub header_extension: String,
    pub header_prefix: String,
    pub global_macro: String,
    pub skip_dirs: Vec<String>,
    pub modules: ModuleTable,
    pub ignore: IgnoreSet,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            header_root: PathBuf::from(DEFAULT_HEADER_ROOT),
            package_root: PathBuf::from(DEFAULT_PACKAGE_ROOT),
            marker: DEFAULT_MARKER.to_string(),
            source_extension: "go".to_string(),
            header_extension: "h".to_string(),
            header_prefix: DEFAULT_HEADER_PREFIX.to_string(),
            global_macro: GLOBAL_MACRO.to_string(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            modules: ModuleTable::allegro_defaults(),
            ignore: IgnoreSet::allegro_defaults(),
        }
    }
}

impl CoverageConfig {
    /// Layer a loaded file over this configuration.
    pub fn merge(mut self, file: BindcovConfig) -> Self {
        if let Some(v) = file.header_root {
            self.header_root = v;
        }
        if let Some(v) = file.package_root {
            self.package_root = v;
        }
        if let Some(v) = file.marker {
            self.marker = v;
        }
        if let Some(v) = file.source_extension {
            self.source_extension = v;
        }
        if let Some(v) = file.header_extension {
            self.header_extension = v;
        }
        if let Some(v) = file.header_prefix {
            self.header_prefix = v;
        }
        if let Some(v) = file.global_macro {
            self.global_macro = v;
        }
        if let Some(v) = file.skip_dirs {
            self.skip_dirs = v;
        }
        if let Some(v) = file.modules {
            self.modules = ModuleTable::new(v);
        }
        if file.default_ignore == Some(false) {
            self.ignore = IgnoreSet::new();
        }
        if let Some(v) = file.ignore {
            self.ignore.extend(v);
        }
        self
    }
}
