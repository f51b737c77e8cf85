//! Per-document assembly driver.
//!
//! One [`DiagramAssembler`] is built per load with the schema version
//! fixed. Each document moves through the same phases in a mandatory
//! order: metadata, shapes, ancillary shapes (notes, texts), then link
//! resolution. The shape index is populated incrementally during the
//! shape phases and read exhaustively exactly once, at the boundary into
//! link resolution - links may reference identifiers defined anywhere in
//! the document, so resolving earlier would miss forward references.

use std::rc::Rc;

use log::debug;

use skein_core::geometry::Point;
use skein_core::project::{Document, DocumentKind};
use skein_core::shape::{ClassShape, LinkableShape, NoteShape, TextShape};

use crate::builder::{ModelBuilder, placement};
use crate::error::{ParseError, ParseResult};
use crate::links::{LinkResolver, ShapeIndex};
use crate::sequence::SequenceDiagramAssembler;
use crate::usecase::UseCaseDiagramAssembler;
use crate::vocabulary::{SchemaVersion, int_or_zero};
use crate::xml::XmlElement;

/// Drives the load of one document element into a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct DiagramAssembler {
    builder: ModelBuilder,
    resolver: LinkResolver,
}

impl DiagramAssembler {
    pub fn new(version: SchemaVersion) -> Self {
        let builder = ModelBuilder::new(version);
        Self {
            builder,
            resolver: LinkResolver::new(builder),
        }
    }

    /// Assemble one `PyutDocument` element.
    pub fn assemble_document(&self, element: &XmlElement) -> ParseResult<Document> {
        let title = element.required_attribute("title")?.to_string();
        let kind_literal = element.required_attribute("type")?;
        let kind = DocumentKind::from_literal(kind_literal).map_err(|_| {
            ParseError::UnknownDocumentKind {
                kind: kind_literal.to_string(),
                title: title.clone(),
            }
        })?;

        let mut document = Document {
            title,
            kind: Some(kind),
            scroll_position: Point::new(
                int_or_zero(element.attribute("scrollPositionX")),
                int_or_zero(element.attribute("scrollPositionY")),
            ),
            pixels_per_unit: Point::new(
                int_or_zero(element.attribute("pixelsPerUnitX")),
                int_or_zero(element.attribute("pixelsPerUnitY")),
            ),
            ..Document::default()
        };

        debug!(title = document.title, kind:% = kind; "Assembling document");

        match kind {
            DocumentKind::ClassDiagram => self.assemble_class_diagram(element, &mut document)?,
            DocumentKind::UseCaseDiagram => {
                UseCaseDiagramAssembler::new(self.builder, self.resolver)
                    .assemble(element, &mut document)?
            }
            DocumentKind::SequenceDiagram => {
                SequenceDiagramAssembler::new(self.builder, self.resolver)
                    .assemble(element, &mut document)?
            }
        }

        debug!(
            title = document.title,
            shapes = document.shape_count(),
            links = document.links.len();
            "Document assembled"
        );
        Ok(document)
    }

    /// Class diagrams: classes, then notes, then texts, then the index
    /// over classes and notes, then links.
    fn assemble_class_diagram(
        &self,
        element: &XmlElement,
        document: &mut Document,
    ) -> ParseResult<()> {
        for wrapper in element.children(self.builder.vocabulary().class_wrapper) {
            let (position, size) = placement(wrapper)?;
            let model = self.builder.build_class(wrapper)?;
            document.classes.push(Rc::new(ClassShape {
                model,
                position,
                size,
            }));
        }

        document.notes = build_note_shapes(&self.builder, element)?;
        document.texts = build_text_shapes(&self.builder, element)?;

        let mut index = ShapeIndex::new();
        for class in &document.classes {
            index.insert(LinkableShape::Class(Rc::clone(class)));
        }
        for note in &document.notes {
            index.insert(LinkableShape::Note(Rc::clone(note)));
        }

        let resolved = self.resolver.resolve_document_links(element, &index)?;
        document.links = resolved.connectors;
        document.dropped_link_count = resolved.dropped;
        Ok(())
    }
}

/// Build every note shape of a document, in file order.
pub(crate) fn build_note_shapes(
    builder: &ModelBuilder,
    element: &XmlElement,
) -> ParseResult<Vec<Rc<NoteShape>>> {
    let mut notes = Vec::new();
    for wrapper in element.children(builder.vocabulary().note_wrapper) {
        let (position, size) = placement(wrapper)?;
        let model = builder.build_note(wrapper)?;
        notes.push(Rc::new(NoteShape {
            model,
            position,
            size,
        }));
    }
    Ok(notes)
}

/// Build every free-standing text shape of a document, in file order.
pub(crate) fn build_text_shapes(
    builder: &ModelBuilder,
    element: &XmlElement,
) -> ParseResult<Vec<Rc<TextShape>>> {
    let mut texts = Vec::new();
    for wrapper in element.children(builder.vocabulary().text_wrapper) {
        let (position, size) = placement(wrapper)?;
        let model = builder.build_text(wrapper)?;
        texts.push(Rc::new(TextShape {
            model,
            position,
            size,
        }));
    }
    Ok(texts)
}
