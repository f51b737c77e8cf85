//! Skein - a loader for legacy UML diagram project files.
//!
//! Skein reads the two XML dialects of the old Pyut-style project format
//! and reconstructs the full in-memory object graph: per-document shape
//! collections with their model objects, and the resolved connectors
//! between them. It is load-only; nothing here writes XML back out.
//!
//! # Examples
//!
//! ```rust,no_run
//! use skein::{ProjectLoader, config::LoadConfig};
//!
//! // With custom config
//! let config = LoadConfig::default();
//! let loader = ProjectLoader::new(config);
//!
//! // Load from a file (must end in .put or .xml)
//! let project = loader.load_file("diagrams/app.put")
//!     .expect("Failed to load");
//!
//! for (title, document) in &project.documents {
//!     println!("{title}: {} shapes", document.shape_count());
//! }
//!
//! // Or use default config
//! let loader = ProjectLoader::default();
//! ```

pub mod config;

mod error;
mod reader;

pub use error::SkeinError;
pub use reader::{ProjectInfo, read_project_info};

pub use skein_core::{geometry, model, project, shape};
pub use skein_parser::SchemaVersion;

use log::{debug, info};

use skein_core::project::Project;

use config::LoadConfig;

/// Loads legacy diagram projects from text or files.
///
/// The loader is stateless between calls and can be reused; the
/// configuration only controls how strictly unresolved references are
/// treated.
#[derive(Debug, Default)]
pub struct ProjectLoader {
    config: LoadConfig,
}

impl ProjectLoader {
    /// Create a new loader with the given configuration.
    pub fn new(config: LoadConfig) -> Self {
        Self { config }
    }

    /// Load a project from already-read XML text.
    ///
    /// Performs no I/O; given identical input the result is identical.
    ///
    /// # Errors
    ///
    /// Returns `SkeinError` for malformed XML, an unsupported schema
    /// version, or an unknown document kind; with strict references
    /// enabled, also when any link was dropped.
    pub fn load_str(&self, xml: &str) -> Result<Project, SkeinError> {
        info!("Loading project");

        let project = skein_parser::parse_project(xml)?;

        let dropped = project.dropped_link_count();
        if self.config.strict_references() && dropped > 0 {
            return Err(SkeinError::StrictReferences { dropped });
        }

        debug!(documents = project.documents.len(); "Project loaded");
        Ok(project)
    }

    /// Load a project from a file.
    ///
    /// The path must end in one of the two recognized legacy extensions
    /// (`.put`, `.xml`); anything else fails with
    /// [`SkeinError::UnsupportedFileType`] before the file is opened.
    /// I/O errors are rethrown unchanged.
    pub fn load_file(&self, path: impl AsRef<std::path::Path>) -> Result<Project, SkeinError> {
        let raw = reader::read_raw_xml(path.as_ref())?;
        self.load_str(&raw)
    }
}
