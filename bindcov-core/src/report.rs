//! Coverage reports and output formatting - plaintext and JSON.

use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::path::PathBuf;

use crate::error::BindcovError;
use crate::matcher::Declaration;

/// A declared function with no foreign-call reference in the binding source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFunctionReport {
    pub name: String,
    pub return_type: String,
    pub params: String,
    pub header: PathBuf,
    /// Empty for the global pass.
    pub module: String,
}

impl MissingFunctionReport {
    pub fn new(decl: Declaration, header: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            name: decl.name,
            return_type: decl.return_type,
            params: decl.params,
            header: header.into(),
            module: module.into(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.module.is_empty()
    }
}

impl fmt::Display for MissingFunctionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            write!(
                f,
                "Missing allegro function '{}' in file '{}'",
                self.name,
                self.header.display()
            )
        } else {
            write!(
                f,
                "Module '{}' missing function '{}' [{} {}({})]",
                self.module, self.name, self.return_type, self.name, self.params
            )
        }
    }
}

/// Everything a coverage run produced, in production order per stream.
#[derive(Debug, Default)]
pub struct CoverageResult {
    pub reports: Vec<MissingFunctionReport>,
    pub errors: Vec<BindcovError>,
}

impl CoverageResult {
    /// A run passes when it produced no reports and no errors.
    pub fn is_clean(&self) -> bool {
        self.reports.is_empty() && self.errors.is_empty()
    }

    /// One human-readable line per failure: reports first, then errors.
    pub fn failure_lines(&self) -> Vec<String> {
        self.reports
            .iter()
            .map(ToString::to_string)
            .chain(self.errors.iter().map(|e| format!("Error: {}", e)))
            .collect()
    }

    /// Reports for one module; `""` selects the global pass.
    pub fn reports_for_module<'a>(
        &'a self,
        module: &'a str,
    ) -> impl Iterator<Item = &'a MissingFunctionReport> + 'a {
        self.reports.iter().filter(move |r| r.module == module)
    }

    /// JSON summary of the run.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "clean": self.is_clean(),
            "missing_count": self.reports.len(),
            "error_count": self.errors.len(),
            "missing": self.reports,
            "errors": self.errors.iter().map(|e| {
                json!({
                    "message": e.to_string(),
                    "path": e.path().map(|p| p.display().to_string()),
                    "module": e.module(),
                })
            }).collect::<Vec<_>>(),
        })
    }
}

/// Prints a coverage result in plain text format.
pub fn print_plain(result: &CoverageResult) {
    if result.is_clean() {
        println!("All declared functions are bound.");
        return;
    }

    if !result.reports.is_empty() {
        println!("MISSING FUNCTIONS ({}):", result.reports.len());
        for report in &result.reports {
            println!("- {}", report);
        }
    }
    if !result.errors.is_empty() {
        println!("ERRORS ({}):", result.errors.len());
        for err in &result.errors {
            println!("- {}", err);
        }
    }
}

/// Prints a coverage result in JSON format.
///
/// Falls back to plain lines if serialization fails.
pub fn print_json(result: &CoverageResult) {
    match serde_json::to_string_pretty(&result.to_json()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "JSON serialization failed");
            for line in result.failure_lines() {
                println!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str) -> Declaration {
        Declaration {
            return_type: "bool".into(),
            name: name.into(),
            params: "ALLEGRO_FONT *f, int x".into(),
        }
    }

    #[test]
    fn test_global_display() {
        let r = MissingFunctionReport::new(decl("al_foo"), "/inc/allegro5/display.h", "");
        assert!(r.is_global());
        assert_eq!(
            r.to_string(),
            "Missing allegro function 'al_foo' in file '/inc/allegro5/display.h'"
        );
    }

    #[test]
    fn test_module_display() {
        let r = MissingFunctionReport::new(decl("al_draw"), "/inc/allegro_font.h", "font");
        assert_eq!(
            r.to_string(),
            "Module 'font' missing function 'al_draw' [bool al_draw(ALLEGRO_FONT *f, int x)]"
        );
    }

    #[test]
    fn test_failure_lines_and_clean() {
        let mut result = CoverageResult::default();
        assert!(result.is_clean());

        result
            .reports
            .push(MissingFunctionReport::new(decl("al_a"), "a.h", ""));
        result.errors.push(BindcovError::missing_assets(
            "ttf",
            crate::error::ModuleAsset::Header,
            "/inc/allegro_ttf.h",
        ));
        let lines = result.failure_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Missing allegro function 'al_a'"));
        assert!(lines[1].starts_with("Error: Module 'ttf' header not found"));
        assert!(!result.is_clean());
    }

    #[test]
    fn test_json_summary() {
        let mut result = CoverageResult::default();
        result
            .reports
            .push(MissingFunctionReport::new(decl("al_b"), "b.h", "color"));
        let json = result.to_json();
        assert_eq!(json["missing_count"], 1);
        assert_eq!(json["missing"][0]["name"], "al_b");
        assert_eq!(json["missing"][0]["module"], "color");
        assert_eq!(json["clean"], false);
    }
}
