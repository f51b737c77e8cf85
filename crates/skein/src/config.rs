//! Configuration types for project loading.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be
//! loaded from an external TOML file (the CLI does exactly that).
//!
//! # Example
//!
//! ```
//! # use skein::config::LoadConfig;
//! let config = LoadConfig::default();
//! assert!(!config.strict_references());
//! ```

use serde::Deserialize;

/// Top-level load configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadConfig {
    /// Treat dropped links as a hard failure.
    ///
    /// By default a link whose endpoint identifiers cannot be resolved is
    /// logged and dropped, and the load succeeds - stale references are a
    /// normal condition in legacy files. With strict references enabled,
    /// any dropped link fails the load instead.
    #[serde(default)]
    strict_references: bool,
}

impl LoadConfig {
    /// Creates a configuration with the given strictness.
    pub fn new(strict_references: bool) -> Self {
        Self { strict_references }
    }

    /// Whether dropped links fail the load.
    pub fn strict_references(&self) -> bool {
        self.strict_references
    }
}
