//! Builder pattern API for coverage runs.
//!
//! Provides a fluent interface for configuring and running a check:
//!
//! ```rust,ignore
//! use bindcov_core::prelude::*;
//!
//! let result = Bindcov::new("allegro")
//!     .header_root("/usr/include/allegro5")
//!     .ignore(["al_get_new_display_adapter"])
//!     .run()?;
//!
//! for line in result.failure_lines() {
//!     eprintln!("{}", line);
//! }
//! ```

use std::path::PathBuf;

use crate::config::{BindcovConfig, CoverageConfig};
use crate::error::BindcovResult;
use crate::ignore::IgnoreSet;
use crate::module::{ModuleSpec, ModuleTable};
use crate::reconcile::Reconciler;
use crate::report::CoverageResult;

/// Builder for configuring a coverage run.
///
/// Starts from the Allegro defaults with the given package root.
#[derive(Debug, Clone)]
pub struct Bindcov {
    config: CoverageConfig,

    /// Extra ignored names, applied after the base set is chosen
    extra_ignore: Vec<String>,

    /// Whether to keep the built-in ignore list
    default_ignore: bool,
}

impl Bindcov {
    /// Create a new builder for the given binding package root.
    pub fn new(package_root: impl Into<PathBuf>) -> Self {
        Self {
            config: CoverageConfig {
                package_root: package_root.into(),
                ..CoverageConfig::default()
            },
            extra_ignore: Vec::new(),
            default_ignore: true,
        }
    }

    /// Start from a fully resolved configuration.
    pub fn from_config(config: CoverageConfig) -> Self {
        Self {
            config,
            extra_ignore: Vec::new(),
            default_ignore: true,
        }
    }

    /// Layer a loaded `bindcov.toml` over the current settings.
    pub fn with_file(mut self, file: BindcovConfig) -> Self {
        self.config = self.config.merge(file);
        self
    }

    /// Directory holding the native library's headers.
    pub fn header_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.header_root = root.into();
        self
    }

    /// Binding package root.
    pub fn package_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.package_root = root.into();
        self
    }

    /// Foreign-call marker preceding a bound function name.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.config.marker = marker.into();
        self
    }

    /// Extension of binding source files.
    pub fn source_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.source_extension = ext.into();
        self
    }

    /// Macro token of declarations outside any module.
    pub fn global_macro(mut self, token: impl Into<String>) -> Self {
        self.config.global_macro = token.into();
        self
    }

    /// Replace the module table.
    pub fn modules(mut self, modules: impl IntoIterator<Item = ModuleSpec>) -> Self {
        self.config.modules = ModuleTable::new(modules.into_iter().collect());
        self
    }

    /// Add names to the ignore set.
    pub fn ignore(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_ignore.extend(names.into_iter().map(Into::into));
        self
    }

    /// Keep or drop the built-in ignore list.
    pub fn default_ignore(mut self, enabled: bool) -> Self {
        self.default_ignore = enabled;
        self
    }

    /// Resolve the final immutable configuration.
    pub fn build(&self) -> CoverageConfig {
        let mut config = self.config.clone();
        if !self.default_ignore {
            config.ignore = IgnoreSet::new();
        }
        config.ignore.extend(self.extra_ignore.iter().cloned());
        config
    }

    /// Run the check and return results.
    pub fn run(&self) -> BindcovResult<CoverageResult> {
        Ok(Reconciler::new(self.build())?.run())
    }
}
