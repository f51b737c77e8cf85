//! Error types for Skein operations.
//!
//! This module provides the main error type [`SkeinError`] which wraps
//! the conditions that can occur while locating, reading, and parsing a
//! project file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use skein_parser::ParseError;

/// The main error type for Skein operations.
#[derive(Debug, Error)]
pub enum SkeinError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The path does not end in one of the recognized project
    /// extensions. Raised before any file content is read.
    #[error("unsupported file type: {path:?} (expected a .put or .xml file)")]
    UnsupportedFileType { path: PathBuf },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Strict mode only: the file loaded, but links were dropped for
    /// unresolved references.
    #[error("{dropped} link(s) dropped for unresolved references")]
    StrictReferences { dropped: usize },
}
