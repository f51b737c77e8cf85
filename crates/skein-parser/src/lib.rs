//! # Skein Parser
//!
//! Parser for legacy UML diagram project XML. This crate turns the raw
//! text of a project file into the fully connected object graph defined
//! by `skein-core`: documents of positioned shapes, their model objects,
//! and the resolved connectors between them.
//!
//! Two schema dialects are read interchangeably; the project root's
//! `version` attribute selects the vocabulary and the handful of
//! structural differences, and everything above the
//! [`vocabulary`] tables stays version-agnostic.
//!
//! Parsing is a single synchronous pass over an in-memory document:
//! there is no streaming and no partial result. Links whose endpoint
//! identifiers cannot be resolved are logged and dropped rather than
//! failing the load (stale references are a normal condition in old
//! files); structural corruption and unknown document kinds fail the
//! whole load.
//!
//! ## Usage
//!
//! ```
//! let xml = r#"
//!     <PyutProject version="11" CodePath="">
//!         <PyutDocument type="CLASS_DIAGRAM" title="Diagram-1"
//!                       scrollPositionX="0" scrollPositionY="0"
//!                       pixelsPerUnitX="20" pixelsPerUnitY="20">
//!             <OglClass width="100" height="60" x="10" y="20">
//!                 <PyutClass id="1" name="Example" description=""/>
//!             </OglClass>
//!         </PyutDocument>
//!     </PyutProject>
//! "#;
//!
//! let project = skein_parser::parse_project(xml).expect("well-formed project");
//! assert_eq!(project.documents["Diagram-1"].classes.len(), 1);
//! ```

mod assembler;
mod sequence;
mod usecase;

pub mod builder;
pub mod error;
pub mod links;
pub mod vocabulary;
pub mod xml;

pub use assembler::DiagramAssembler;
pub use error::{ParseError, ParseResult};
pub use vocabulary::SchemaVersion;

use log::{debug, info};

use skein_core::project::Project;

use vocabulary::{ELEMENT_DOCUMENT, ELEMENT_PROJECT};

/// Attribute carrying the source-code directory on the project root.
const ATTR_CODE_PATH: &str = "CodePath";

/// Parse a whole project from XML text.
///
/// This is the main entry point. It performs no I/O and is idempotent:
/// parsing the same text twice yields equal results. The schema version
/// is read from the project root and fixed for the entire load.
///
/// # Errors
///
/// Returns [`ParseError`] for malformed XML, an unrecognized schema
/// version, structurally broken elements, or an unknown document kind.
/// Unresolvable link endpoints are not errors; see the crate docs.
pub fn parse_project(xml: &str) -> ParseResult<Project> {
    let root = xml::parse_document(xml)?;
    if root.name() != ELEMENT_PROJECT {
        return Err(ParseError::MalformedElement {
            element: root.name().to_string(),
            detail: format!("expected <{ELEMENT_PROJECT}> document root"),
        });
    }

    let version_literal = root.required_attribute("version")?;
    let version = SchemaVersion::from_version_attribute(version_literal)?;
    info!(version:% = version; "Parsing project");

    let mut project = Project {
        version: version_literal.to_string(),
        code_path: root.attribute(ATTR_CODE_PATH).unwrap_or_default().to_string(),
        ..Project::default()
    };

    let assembler = DiagramAssembler::new(version);
    for element in root.children(ELEMENT_DOCUMENT) {
        let document = assembler.assemble_document(element)?;
        debug!(title = document.title; "Loaded document");
        project.documents.insert(document.title.clone(), document);
    }

    info!(
        documents = project.documents.len(),
        dropped_links = project.dropped_link_count();
        "Project parsed"
    );
    Ok(project)
}
