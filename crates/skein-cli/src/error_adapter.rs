//! Error adapter for converting SkeinError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use skein::SkeinError;

/// Adapter wrapping a [`SkeinError`] so miette can render it with a code
/// and help text.
pub struct ReportAdapter<'a> {
    /// The wrapped error
    err: &'a SkeinError,
}

impl<'a> ReportAdapter<'a> {
    /// Create a new report adapter.
    pub fn new(err: &'a SkeinError) -> Self {
        Self { err }
    }
}

impl fmt::Debug for ReportAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportAdapter").field("err", &self.err).finish()
    }
}

impl fmt::Display for ReportAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl std::error::Error for ReportAdapter<'_> {}

impl MietteDiagnostic for ReportAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            SkeinError::Io(_) => "skein::io",
            SkeinError::UnsupportedFileType { .. } => "skein::unsupported_file_type",
            SkeinError::Parse(_) => "skein::parse",
            SkeinError::StrictReferences { .. } => "skein::strict_references",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match self.err {
            SkeinError::UnsupportedFileType { .. } => {
                "only .put and .xml project files are recognized"
            }
            SkeinError::StrictReferences { .. } => {
                "rerun without --strict to load the file and drop the dangling links"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}
