//! Source location captured when an error is constructed.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location as PanicLocation;

/// File, line and column of the code that raised an error.
///
/// Rendered as `[file:line:column]` at the end of every error message so a
/// log line points straight at its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl ErrorLocation {
    pub const fn from(location: &'static PanicLocation<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Location of whoever called the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(PanicLocation::caller())
    }
}

impl Display for ErrorLocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "[{}:{}:{}]", self.file, self.line, self.column)
    }
}
