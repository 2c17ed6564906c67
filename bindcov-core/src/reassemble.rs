//! Logical-line reassembly for header text.
//!
//! Declaration macros may wrap across several physical lines before their
//! terminating `;`. The reassembler turns raw header text into logical lines
//! that the single-line [`DeclarationPattern`] can match:
//!
//! - every physical line is trimmed
//! - a line that opens an invocation of the macro (prefix check) keeps
//!   absorbing following physical lines, whatever they contain, until one
//!   ends with `;`
//! - any other line is emitted on its own
//!
//! Physical lines joined into one logical line are separated by a single
//! space. Output order always follows the physical order of the input,
//! including non-declaration lines, which are emitted and simply never match.
//!
//! An invocation that reaches end of input unterminated yields one
//! [`BindcovError::MalformedDeclaration`] and ends the sequence.

use std::iter::Enumerate;
use std::path::Path;
use std::str::Lines;
use std::sync::mpsc;

use crate::error::{BindcovError, BindcovResult};
use crate::matcher::{Declaration, DeclarationPattern};

/// Capacity of the channel between the reassembler and the matcher.
const LINE_BUFFER: usize = 64;

/// One fully reassembled statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    /// 1-indexed physical line the statement starts on.
    pub line: usize,
}

/// Lazy, single-pass sequence of logical lines over one header's text.
pub struct LogicalLines<'a> {
    path: &'a Path,
    pattern: &'a DeclarationPattern,
    lines: Enumerate<Lines<'a>>,
    finished: bool,
}

impl<'a> LogicalLines<'a> {
    pub fn new(path: &'a Path, text: &'a str, pattern: &'a DeclarationPattern) -> Self {
        Self {
            path,
            pattern,
            lines: text.lines().enumerate(),
            finished: false,
        }
    }
}

impl Iterator for LogicalLines<'_> {
    type Item = BindcovResult<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let (index, raw) = self.lines.next()?;
        let mut current = raw.trim();
        let mut text = current.to_string();

        if self.pattern.opens_invocation(current) {
            // Bounded by the remaining physical lines.
            while !current.ends_with(';') {
                let Some((_, raw)) = self.lines.next() else {
                    self.finished = true;
                    return Some(Err(BindcovError::MalformedDeclaration {
                        path: self.path.to_path_buf(),
                        line: index + 1,
                        macro_name: self.pattern.macro_name().to_string(),
                    }));
                };
                current = raw.trim();
                if !current.is_empty() {
                    text.push(' ');
                    text.push_str(current);
                }
            }
        }

        Some(Ok(LogicalLine {
            text,
            line: index + 1,
        }))
    }
}

/// Run the reassembler as its own stage and feed every matched declaration
/// to `visit`, in physical order.
///
/// The reassembler runs on a scoped thread connected to the matcher by a
/// bounded channel; dropping the sender on exhaustion closes the stream.
/// Returns the malformed-declaration error, if any, after every declaration
/// preceding it has been visited.
pub fn for_each_declaration<F>(
    path: &Path,
    text: &str,
    pattern: &DeclarationPattern,
    mut visit: F,
) -> BindcovResult<()>
where
    F: FnMut(Declaration),
{
    std::thread::scope(|scope| {
        let (tx, rx) = mpsc::sync_channel(LINE_BUFFER);

        scope.spawn(move || {
            for line in LogicalLines::new(path, text, pattern) {
                // Receiver gone: the consumer stopped early.
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        for line in rx {
            let line = line?;
            if let Some(decl) = pattern.match_line(&line.text) {
                visit(decl);
            }
        }
        Ok(())
    })
}
