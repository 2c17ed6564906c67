//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use bindcov_core::prelude::*;
//! ```

pub use crate::builder::Bindcov;
pub use crate::config::{load_config, CoverageConfig};
pub use crate::error::{BindcovError, BindcovResult};
pub use crate::ignore::IgnoreSet;
pub use crate::module::{ModuleSpec, ModuleTable};
pub use crate::reconcile::Reconciler;
pub use crate::report::{CoverageResult, MissingFunctionReport};
