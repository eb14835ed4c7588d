//! Error adapter for converting ResgridError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Each variant gets
//! a stable diagnostic code and, where the fix is usually obvious, a help
//! line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use resgrid::ResgridError;

/// Adapter wrapping a [`ResgridError`] so it can be rendered by miette.
pub struct ErrorAdapter<'a>(pub &'a ResgridError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ResgridError::Io(_) => "resgrid::io",
            ResgridError::Json(_) => "resgrid::json",
            ResgridError::Config(_) => "resgrid::config",
            ResgridError::InvalidArgument(_) => "resgrid::invalid_argument",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ResgridError::Json(_) => {
                "the input must be a JSON object with a `reservations` array"
            }
            ResgridError::Config(_) => {
                "check the [layout], [grid] and [calendar] tables of the configuration file"
            }
            ResgridError::InvalidArgument(_) => "pass a reservation export as the input file",
            ResgridError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
