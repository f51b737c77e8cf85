//! Command-line argument definitions for the Skein CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Arguments control the input path, configuration
//! file selection, reference strictness, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Skein project inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input project file (.put or .xml)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Fail the load when any link has an unresolved endpoint
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
