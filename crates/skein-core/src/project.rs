//! Project and document result containers.
//!
//! A [`Project`] is the complete result of one load: project-level
//! metadata plus every document, keyed by title in file order. Documents
//! exclusively own their shape and connector collections; connectors hold
//! `Rc` references back into the shape collections, so everything is
//! dropped together when the project goes away.

use std::fmt::{self, Display};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::model::UnknownEnumLiteral;
use crate::shape::connector::{Connector, SdMessageShape};
use crate::shape::{
    ActorShape, ClassShape, NoteShape, SdInstanceShape, TextShape, UseCaseShape,
};

/// The kind of a diagram document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    ClassDiagram,
    SequenceDiagram,
    UseCaseDiagram,
}

impl DocumentKind {
    /// Parse the wire literal (`CLASS_DIAGRAM`, ...).
    pub fn from_literal(literal: &str) -> Result<Self, UnknownEnumLiteral> {
        match literal {
            "CLASS_DIAGRAM" => Ok(Self::ClassDiagram),
            "SEQUENCE_DIAGRAM" => Ok(Self::SequenceDiagram),
            "USECASE_DIAGRAM" => Ok(Self::UseCaseDiagram),
            _ => Err(UnknownEnumLiteral::new(literal, "DocumentKind")),
        }
    }
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClassDiagram => "CLASS_DIAGRAM",
            Self::SequenceDiagram => "SEQUENCE_DIAGRAM",
            Self::UseCaseDiagram => "USECASE_DIAGRAM",
        };
        write!(f, "{s}")
    }
}

/// One loaded diagram document.
///
/// Collections that do not apply to the document's kind stay empty: a
/// class diagram never has actors, a sequence diagram never has classes.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub kind: Option<DocumentKind>,
    pub scroll_position: Point,
    pub pixels_per_unit: Point,
    pub classes: Vec<Rc<ClassShape>>,
    pub notes: Vec<Rc<NoteShape>>,
    pub texts: Vec<Rc<TextShape>>,
    pub actors: Vec<Rc<ActorShape>>,
    pub use_cases: Vec<Rc<UseCaseShape>>,
    pub sd_instances: Vec<Rc<SdInstanceShape>>,
    pub sd_messages: Vec<SdMessageShape>,
    pub links: Vec<Connector>,
    /// Number of link or message elements that were present in the file
    /// but dropped because an endpoint could not be resolved. Diagnostic
    /// only; a load with dropped links still succeeds.
    pub dropped_link_count: usize,
}

impl Document {
    /// Total number of shapes across all collections (connectors and
    /// messages excluded).
    pub fn shape_count(&self) -> usize {
        self.classes.len()
            + self.notes.len()
            + self.texts.len()
            + self.actors.len()
            + self.use_cases.len()
            + self.sd_instances.len()
    }
}

/// The complete result of loading one project file.
#[derive(Debug, Clone, Default)]
pub struct Project {
    /// Raw schema version string from the project root (`"10"` or `"11"`).
    pub version: String,
    /// Source-code directory recorded by the authoring tool; often empty.
    pub code_path: String,
    /// Documents keyed by title, preserving file order.
    pub documents: IndexMap<String, Document>,
}

impl Project {
    /// Total dropped links across all documents.
    pub fn dropped_link_count(&self) -> usize {
        self.documents
            .values()
            .map(|d| d.dropped_link_count)
            .sum()
    }
}
