//! Binding modules: named groups of native functions with their own header
//! file, declaration macro and binding-source subdirectory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of derived module header file names.
pub const DEFAULT_HEADER_PREFIX: &str = "allegro_";

/// Static description of one binding module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Unique module name.
    pub name: String,
    /// Declaration macro token used by the module's header.
    #[serde(rename = "macro")]
    pub macro_token: String,
    /// Header name segment, when it differs from `name`.
    #[serde(default)]
    pub header: Option<String>,
    /// Source subdirectory, when it differs from `name`.
    #[serde(default)]
    pub path: Option<String>,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>, macro_token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            macro_token: macro_token.into(),
            header: None,
            path: None,
        }
    }

    /// Override the header name segment.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Override the source subdirectory.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Header file name, e.g. `allegro_native_dialog.h`.
    pub fn header_file_name(&self, prefix: &str, extension: &str) -> String {
        let segment = self.header.as_deref().unwrap_or(&self.name);
        format!("{}{}.{}", prefix, segment, extension)
    }

    /// Source subdirectory relative to the package root, e.g. `font/ttf`.
    pub fn source_subdirectory(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }

    /// Full header path under `header_root`.
    pub fn header_path(&self, header_root: &Path, prefix: &str, extension: &str) -> PathBuf {
        header_root.join(self.header_file_name(prefix, extension))
    }

    /// Full source directory under `package_root`.
    pub fn source_dir(&self, package_root: &Path) -> PathBuf {
        self.source_subdirectory()
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(package_root.to_path_buf(), |dir, segment| dir.join(segment))
    }
}

/// Ordered, read-only list of modules scanned by the per-module pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleTable {
    modules: Vec<ModuleSpec>,
}

impl ModuleTable {
    pub fn new(modules: Vec<ModuleSpec>) -> Self {
        Self { modules }
    }

    /// Allegro add-on modules.
    ///
    /// The audio add-on is not bound and is left out.
    pub fn allegro_defaults() -> Self {
        Self::new(vec![
            ModuleSpec::new("acodec", "ALLEGRO_ACODEC_FUNC"),
            ModuleSpec::new("color", "ALLEGRO_COLOR_FUNC"),
            ModuleSpec::new("dialog", "ALLEGRO_DIALOG_FUNC").with_header("native_dialog"),
            ModuleSpec::new("font", "ALLEGRO_FONT_FUNC"),
            ModuleSpec::new("image", "ALLEGRO_IIO_FUNC"),
            ModuleSpec::new("memfile", "ALLEGRO_MEMFILE_FUNC"),
            ModuleSpec::new("physfs", "ALLEGRO_PHYSFS_FUNC"),
            ModuleSpec::new("ttf", "ALLEGRO_TTF_FUNC").with_path("font/ttf"),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleSpec> {
        self.modules.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ModuleSpec> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModuleTable {
    type Item = &'a ModuleSpec;
    type IntoIter = std::slice::Iter<'a, ModuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_names() {
        let m = ModuleSpec::new("font", "ALLEGRO_FONT_FUNC");
        assert_eq!(m.header_file_name(DEFAULT_HEADER_PREFIX, "h"), "allegro_font.h");
        assert_eq!(m.source_subdirectory(), "font");
    }

    #[test]
    fn test_header_extension_follows_config() {
        let m = ModuleSpec::new("font", "ALLEGRO_FONT_FUNC");
        assert_eq!(m.header_file_name("allegro_", "hpp"), "allegro_font.hpp");
        assert_eq!(
            m.header_path(Path::new("/inc"), "allegro_", "hpp"),
            PathBuf::from("/inc/allegro_font.hpp")
        );
    }

    #[test]
    fn test_overrides() {
        let table = ModuleTable::allegro_defaults();
        let dialog = table.get("dialog").unwrap();
        assert_eq!(
            dialog.header_file_name(DEFAULT_HEADER_PREFIX, "h"),
            "allegro_native_dialog.h"
        );
        assert_eq!(dialog.source_subdirectory(), "dialog");

        let ttf = table.get("ttf").unwrap();
        assert_eq!(ttf.header_file_name(DEFAULT_HEADER_PREFIX, "h"), "allegro_ttf.h");
        assert_eq!(
            ttf.source_dir(Path::new("/pkg/allegro")),
            PathBuf::from("/pkg/allegro/font/ttf")
        );
    }

    #[test]
    fn test_default_table_order() {
        let names: Vec<_> = ModuleTable::allegro_defaults()
            .iter()
            .map(|m| m.name.clone())
            .collect();
        assert_eq!(
            names,
            vec!["acodec", "color", "dialog", "font", "image", "memfile", "physfs", "ttf"]
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let spec: ModuleSpec =
            toml::from_str("name = \"ttf\"\nmacro = \"ALLEGRO_TTF_FUNC\"\npath = \"font/ttf\"")
                .unwrap();
        assert_eq!(spec.macro_token, "ALLEGRO_TTF_FUNC");
        assert_eq!(spec.header, None);
        assert_eq!(spec.path.as_deref(), Some("font/ttf"));
    }
}
