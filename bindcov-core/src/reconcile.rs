//! Coverage reconciliation: headers against binding source.
//!
//! A run is two passes over the header corpus:
//!
//! 1. **Global pass**: every header under the header root (minus skipped
//!    directories) is matched with the global declaration pattern and
//!    checked against the binding files directly in the package root.
//! 2. **Module pass**: for each module in table order, its own header is
//!    matched with its own pattern and checked against the binding files
//!    directly in its source subdirectory.
//!
//! ```text
//!   headers ──► reassembler ──► matcher ──► classify ──► reports channel
//!                                               │
//!   read / walk / asset failures ───────────────┴──────► errors channel
//! ```
//!
//! Failure scope:
//! - unreadable or malformed header: that header only
//! - missing module header or source directory: that module only
//! - unreadable module source: that module only
//! - unreadable package root source: the whole run

use std::collections::HashSet;
use std::path::Path;
use std::sync::mpsc::{self, Sender};

use tracing::{debug, info, warn};

use crate::config::CoverageConfig;
use crate::error::{BindcovError, BindcovResult, ModuleAsset};
use crate::headers::gather_headers;
use crate::matcher::{Declaration, DeclarationPattern};
use crate::module::ModuleSpec;
use crate::reassemble::for_each_declaration;
use crate::report::{CoverageResult, MissingFunctionReport};
use crate::source::BindingSource;

/// How one extracted declaration was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Empty or underscore-prefixed name, never reported.
    Private,
    /// Listed in the ignore set.
    Ignored,
    /// `marker + name` occurs in the binding source.
    Implemented,
    /// Reported as missing.
    Missing,
}

/// Drives header scanning for one immutable configuration.
#[derive(Debug)]
pub struct Reconciler {
    config: CoverageConfig,
    global: DeclarationPattern,
    modules: Vec<(ModuleSpec, DeclarationPattern)>,
}

impl Reconciler {
    /// Compile every declaration pattern up front.
    pub fn new(config: CoverageConfig) -> BindcovResult<Self> {
        let global = DeclarationPattern::compile(&config.global_macro)?;
        let modules = config
            .modules
            .iter()
            .map(|spec| Ok((spec.clone(), DeclarationPattern::compile(&spec.macro_token)?)))
            .collect::<BindcovResult<Vec<_>>>()?;

        Ok(Self {
            config,
            global,
            modules,
        })
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Run the producer and both consumers concurrently and aggregate.
    ///
    /// This is the single entry point a host test calls.
    pub fn run(&self) -> CoverageResult {
        let (report_tx, report_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();

        let result = std::thread::scope(|scope| {
            scope.spawn(move || self.scan(report_tx, error_tx));
            let reports = scope.spawn(move || report_rx.into_iter().collect::<Vec<_>>());
            let errors = scope.spawn(move || error_rx.into_iter().collect::<Vec<_>>());

            CoverageResult {
                reports: reports
                    .join()
                    .unwrap_or_else(|p| std::panic::resume_unwind(p)),
                errors: errors
                    .join()
                    .unwrap_or_else(|p| std::panic::resume_unwind(p)),
            }
        });

        info!(
            missing = result.reports.len(),
            errors = result.errors.len(),
            "coverage run finished"
        );
        result
    }

    /// Production stage: emit reports and errors onto the two channels.
    ///
    /// Both senders are owned here, so both channels close when this
    /// returns, whether the run completed or aborted.
    pub fn scan(&self, reports: Sender<MissingFunctionReport>, errors: Sender<BindcovError>) {
        let cfg = &self.config;

        let source = match BindingSource::read(&cfg.package_root, &cfg.source_extension, None) {
            Ok(source) => source,
            Err(err) => {
                emit_error(&errors, err);
                return;
            }
        };

        let walk = gather_headers(&cfg.header_root, &cfg.skip_dirs, &cfg.header_extension);
        debug!(
            root = %cfg.header_root.display(),
            headers = walk.headers.len(),
            "global pass"
        );
        for err in walk.errors {
            emit_error(&errors, err);
        }
        for header in &walk.headers {
            self.scan_header(header, &source, &self.global, "", &reports, &errors);
        }

        for (spec, pattern) in &self.modules {
            self.scan_module(spec, pattern, &reports, &errors);
        }
    }

    fn scan_module(
        &self,
        spec: &ModuleSpec,
        pattern: &DeclarationPattern,
        reports: &Sender<MissingFunctionReport>,
        errors: &Sender<BindcovError>,
    ) {
        let cfg = &self.config;
        let header =
            spec.header_path(&cfg.header_root, &cfg.header_prefix, &cfg.header_extension);
        let root = spec.source_dir(&cfg.package_root);

        if !header.is_file() {
            emit_error(
                errors,
                BindcovError::missing_assets(&spec.name, ModuleAsset::Header, header),
            );
            return;
        }
        if !root.is_dir() {
            emit_error(
                errors,
                BindcovError::missing_assets(&spec.name, ModuleAsset::SourceDirectory, root),
            );
            return;
        }

        let source = match BindingSource::read(&root, &cfg.source_extension, Some(&spec.name)) {
            Ok(source) => source,
            Err(err) => {
                emit_error(errors, err);
                return;
            }
        };

        debug!(
            module = %spec.name,
            header = %header.display(),
            source = %source.root().display(),
            files = source.file_count(),
            "module pass"
        );
        self.scan_header(&header, &source, pattern, &spec.name, reports, errors);
    }

    fn scan_header(
        &self,
        header: &Path,
        source: &BindingSource,
        pattern: &DeclarationPattern,
        module: &str,
        reports: &Sender<MissingFunctionReport>,
        errors: &Sender<BindcovError>,
    ) {
        let text = match std::fs::read(header) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                emit_error(errors, BindcovError::unreadable_header(header, err));
                return;
            }
        };

        if let Err(err) = self.find_missing(&text, source, header, pattern, module, reports) {
            emit_error(errors, err);
        }
    }

    /// Match one header's text and send a report for every missing function.
    ///
    /// A name declared more than once in the header (e.g. in `#ifdef` and
    /// `#else` branches) is reported once. Returns how many reports were sent.
    pub fn find_missing(
        &self,
        text: &str,
        source: &BindingSource,
        header: &Path,
        pattern: &DeclarationPattern,
        module: &str,
        reports: &Sender<MissingFunctionReport>,
    ) -> BindcovResult<usize> {
        let mut reported = HashSet::new();
        for_each_declaration(header, text, pattern, |decl| {
            if self.classify(&decl, source) == Coverage::Missing
                && reported.insert(decl.name.clone())
            {
                // A closed receiver means nobody is aggregating anymore.
                reports
                    .send(MissingFunctionReport::new(decl, header, module))
                    .ok();
            }
        })?;

        let missing = reported.len();
        debug!(header = %header.display(), module, missing, "scanned header");
        Ok(missing)
    }

    /// Classify one declaration against a binding source.
    pub fn classify(&self, decl: &Declaration, source: &BindingSource) -> Coverage {
        if decl.name.is_empty() || decl.is_private() {
            Coverage::Private
        } else if self.config.ignore.contains(&decl.name) {
            Coverage::Ignored
        } else if source.references(&self.config.marker, &decl.name) {
            Coverage::Implemented
        } else {
            Coverage::Missing
        }
    }
}

fn emit_error(errors: &Sender<BindcovError>, err: BindcovError) {
    warn!(error = %err, fatal = err.is_fatal(), "coverage run error");
    errors.send(err).ok();
}
