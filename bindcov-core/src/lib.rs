//! bindcov-core: binding coverage checking for macro-declared C functions.
//!
//! Native libraries such as Allegro declare their public API through
//! function macros in their headers:
//!
//! ```c
//! AL_FUNC(bool, al_init_font_addon, (void));
//! ALLEGRO_TTF_FUNC(ALLEGRO_FONT *, al_load_ttf_font,
//!                  (char const *filename, int size, int flags));
//! ```
//!
//! This library extracts every such declaration and checks that the binding
//! source references it through the foreign-call marker (`C.al_...` for
//! cgo), reporting each function that is neither bound nor deliberately
//! ignored.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bindcov_core::prelude::*;
//!
//! let result = Bindcov::new("allegro").run()?;
//! assert!(result.is_clean(), "{:#?}", result.failure_lines());
//! ```
//!
//! # Module Organization
//!
//! - [`matcher`]: declaration pattern per macro token
//! - [`reassemble`]: joins multi-line macro invocations into logical lines
//! - [`reconcile`]: global and per-module passes, classification
//! - [`headers`]: header tree discovery
//! - [`source`]: binding source loading
//! - [`module`] / [`ignore`]: module table and ignore set
//! - [`config`] / [`builder`]: run configuration
//! - [`report`]: reports and output formatting
//! - [`error`]: typed error handling

pub mod builder;
pub mod config;
pub mod error;
pub mod headers;
pub mod ignore;
pub mod logging;
pub mod matcher;
pub mod module;
pub mod prelude;
pub mod reassemble;
pub mod reconcile;
pub mod report;
pub mod source;

// Error types
pub use error::{BindcovError, BindcovResult, IoResultExt, ModuleAsset};

// Builder API
pub use builder::Bindcov;

// Configuration
pub use config::{load_config, load_config_file, BindcovConfig, CoverageConfig, CONFIG_FILE};

// Extraction
pub use matcher::{Declaration, DeclarationPattern, GLOBAL_MACRO};
pub use reassemble::{for_each_declaration, LogicalLine, LogicalLines};

// Reconciliation
pub use headers::{gather_headers, HeaderWalk};
pub use ignore::IgnoreSet;
pub use module::{ModuleSpec, ModuleTable};
pub use reconcile::{Coverage, Reconciler};
pub use source::BindingSource;

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{print_json, print_plain, CoverageResult, MissingFunctionReport};
