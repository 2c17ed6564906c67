//! Declaration matching for macro-declared C functions.
//!
//! A declaration line has the shape
//!
//! ```text
//! MACRO(<type>, <name>, (<params>));
//! ```
//!
//! Matching is line-local and anchored only on the fixed structural tokens
//! `(`, `, `, `, (` and `))`. Parentheses inside the parameter list are not
//! balanced; the parameter group simply runs to the last `))` on the line.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{BindcovError, BindcovResult};

/// Macro token used by core library declarations outside any module.
pub const GLOBAL_MACRO: &str = "AL_FUNC";

/// One function declaration recognised on a logical line.
///
/// All three fields are trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub return_type: String,
    pub name: String,
    pub params: String,
}

impl Declaration {
    /// Names starting with `_` are internal to the native library.
    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// A macro token paired with its compiled declaration pattern.
#[derive(Debug, Clone)]
pub struct DeclarationPattern {
    macro_name: String,
    regex: Regex,
}

impl DeclarationPattern {
    /// Compile the pattern for one declaration macro.
    ///
    /// The macro token is matched literally.
    pub fn compile(macro_name: &str) -> BindcovResult<Self> {
        if macro_name.trim().is_empty() {
            return Err(BindcovError::InvalidPattern {
                macro_name: macro_name.to_string(),
                message: "macro token is empty".to_string(),
            });
        }

        let source = format!(
            r"{}\((.*?), (.*?), \((.*)\)\)",
            regex::escape(macro_name)
        );
        let regex = Regex::new(&source).map_err(|e| BindcovError::InvalidPattern {
            macro_name: macro_name.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            macro_name: macro_name.to_string(),
            regex,
        })
    }

    /// Shared pattern for [`GLOBAL_MACRO`].
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<DeclarationPattern> = OnceLock::new();
        // SAFETY: the token is a hardcoded identifier, compilation cannot fail.
        GLOBAL.get_or_init(|| {
            Self::compile(GLOBAL_MACRO).expect("Hardcoded declaration macro is valid")
        })
    }

    /// The literal macro token this pattern recognises.
    pub fn macro_name(&self) -> &str {
        &self.macro_name
    }

    /// True when a trimmed physical line opens an invocation of this macro.
    ///
    /// Plain prefix check, used by the reassembler to decide whether to keep
    /// consuming lines.
    pub fn opens_invocation(&self, line: &str) -> bool {
        line.starts_with(&self.macro_name)
    }

    /// Match one logical line. `None` means "not a declaration line".
    pub fn match_line(&self, line: &str) -> Option<Declaration> {
        let caps = self.regex.captures(line)?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).trim().to_string();

        Some(Declaration {
            return_type: group(1),
            name: group(2),
            params: group(3),
        })
    }
}
