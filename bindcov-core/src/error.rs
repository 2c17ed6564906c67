//! Typed error handling for bindcov.
//!
//! Every failure a coverage run can hit is a [`BindcovError`]. Errors carry
//! the path and, where one applies, the module name, so a reporting sink can
//! render an actionable line without further context.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which half of a module's on-disk assets is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleAsset {
    /// The module's header file under the header root.
    Header,
    /// The module's source subdirectory under the package root.
    SourceDirectory,
}

impl fmt::Display for ModuleAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::SourceDirectory => write!(f, "source directory"),
        }
    }
}

/// Main error type for bindcov operations.
#[derive(Error, Debug)]
pub enum BindcovError {
    /// A single header file could not be read. The header is skipped.
    #[error("Unreadable header {}: {message}", .path.display())]
    UnreadableHeader {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The binding source of a pass could not be read in full.
    #[error("{}", unreadable_source_message(.path, .module.as_deref(), .message))]
    UnreadableSourceTree {
        path: PathBuf,
        /// `None` for the global pass.
        module: Option<String>,
        message: String,
    },

    /// A module's header file or source subdirectory does not exist.
    #[error("Module '{module}' {asset} not found at '{}'", .path.display())]
    MissingModuleAssets {
        module: String,
        asset: ModuleAsset,
        path: PathBuf,
    },

    /// A declaration macro opened on `line` is never terminated by `;`.
    #[error("Unterminated {macro_name} declaration in {} starting at line {line}", .path.display())]
    MalformedDeclaration {
        path: PathBuf,
        /// 1-indexed physical line of the macro invocation.
        line: usize,
        macro_name: String,
    },

    /// A macro token could not be compiled into a declaration pattern.
    #[error("Invalid declaration macro '{macro_name}': {message}")]
    InvalidPattern { macro_name: String, message: String },

    /// Configuration file errors
    #[error("Config error at {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Any other filesystem failure
    #[error("I/O error at {}: {message}", .path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

fn unreadable_source_message(path: &std::path::Path, module: Option<&str>, message: &str) -> String {
    match module {
        Some(module) => format!(
            "Module '{}' source unreadable at '{}': {}",
            module,
            path.display(),
            message
        ),
        None => format!("Binding source unreadable at '{}': {}", path.display(), message),
    }
}

impl BindcovError {
    /// Create an unreadable-header error from the underlying I/O failure.
    pub fn unreadable_header(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::UnreadableHeader {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an unreadable-source-tree error.
    pub fn unreadable_source(
        path: impl Into<PathBuf>,
        module: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnreadableSourceTree {
            path: path.into(),
            module: module.map(str::to_string),
            message: message.into(),
        }
    }

    /// Create a missing-module-assets error.
    pub fn missing_assets(
        module: impl Into<String>,
        asset: ModuleAsset,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::MissingModuleAssets {
            module: module.into(),
            asset,
            path: path.into(),
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True when the error ends the whole run rather than one header or module.
    ///
    /// Only the global pass's binding source is fatal: without it no
    /// classification is meaningful.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnreadableSourceTree { module: None, .. })
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::UnreadableHeader { path, .. }
            | Self::UnreadableSourceTree { path, .. }
            | Self::MissingModuleAssets { path, .. }
            | Self::MalformedDeclaration { path, .. }
            | Self::Config { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::InvalidPattern { .. } => None,
        }
    }

    /// Get the module this error is scoped to, if any.
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::UnreadableSourceTree { module, .. } => module.as_deref(),
            Self::MissingModuleAssets { module, .. } => Some(module),
            _ => None,
        }
    }
}

/// Convenience type alias for bindcov results.
pub type BindcovResult<T> = Result<T, BindcovError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> BindcovResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> BindcovResult<T> {
        self.map_err(|e| BindcovError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_header() {
        let err = BindcovError::unreadable_header(
            "/usr/include/allegro5/bitmap.h",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.path(),
            Some(&PathBuf::from("/usr/include/allegro5/bitmap.h"))
        );
        assert!(err.to_string().contains("bitmap.h"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_missing_assets_message() {
        let err = BindcovError::missing_assets(
            "ttf",
            ModuleAsset::SourceDirectory,
            "/pkg/allegro/font/ttf",
        );
        assert_eq!(err.module(), Some("ttf"));
        assert_eq!(
            err.to_string(),
            "Module 'ttf' source directory not found at '/pkg/allegro/font/ttf'"
        );
    }

    #[test]
    fn test_only_global_source_is_fatal() {
        assert!(BindcovError::unreadable_source("/pkg", None, "gone").is_fatal());
        assert!(!BindcovError::unreadable_source("/pkg/font", Some("font"), "gone").is_fatal());
    }

    #[test]
    fn test_unreadable_source_message_names_module() {
        let err = BindcovError::unreadable_source("/pkg/font", Some("font"), "gone");
        assert!(err.to_string().starts_with("Module 'font' source unreadable"));
        let err = BindcovError::unreadable_source("/pkg", None, "gone");
        assert!(err.to_string().starts_with("Binding source unreadable"));
    }

    #[test]
    fn test_malformed_declaration_display() {
        let err = BindcovError::MalformedDeclaration {
            path: PathBuf::from("a.h"),
            line: 7,
            macro_name: "AL_FUNC".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unterminated AL_FUNC declaration in a.h starting at line 7"
        );
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("/missing/bindcov.toml").unwrap_err();
        assert!(matches!(err, BindcovError::Io { .. }));
    }
}
