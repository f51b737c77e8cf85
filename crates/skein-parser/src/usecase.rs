//! Use-case diagram assembly.

use std::rc::Rc;

use skein_core::project::Document;
use skein_core::shape::{ActorShape, LinkableShape, UseCaseShape};

use crate::assembler::{build_note_shapes, build_text_shapes};
use crate::builder::{ModelBuilder, placement};
use crate::error::ParseResult;
use crate::links::{LinkResolver, ShapeIndex};
use crate::xml::XmlElement;

/// Assembles one use-case document: actors, use cases, notes, texts,
/// then association links over all of them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UseCaseDiagramAssembler {
    builder: ModelBuilder,
    resolver: LinkResolver,
}

impl UseCaseDiagramAssembler {
    pub(crate) fn new(builder: ModelBuilder, resolver: LinkResolver) -> Self {
        Self { builder, resolver }
    }

    pub(crate) fn assemble(
        &self,
        element: &XmlElement,
        document: &mut Document,
    ) -> ParseResult<()> {
        document.actors = build_actor_shapes(&self.builder, element)?;

        for wrapper in element.children(self.builder.vocabulary().use_case_wrapper) {
            let (position, size) = placement(wrapper)?;
            let model = self.builder.build_use_case(wrapper)?;
            document.use_cases.push(Rc::new(UseCaseShape {
                model,
                position,
                size,
            }));
        }

        document.notes = build_note_shapes(&self.builder, element)?;
        document.texts = build_text_shapes(&self.builder, element)?;

        let mut index = ShapeIndex::new();
        for actor in &document.actors {
            index.insert(LinkableShape::Actor(Rc::clone(actor)));
        }
        for use_case in &document.use_cases {
            index.insert(LinkableShape::UseCase(Rc::clone(use_case)));
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

/// Build every actor shape of a document, in file order. Shared with the
/// sequence assembler, which links actors to instances.
pub(crate) fn build_actor_shapes(
    builder: &ModelBuilder,
    element: &XmlElement,
) -> ParseResult<Vec<Rc<ActorShape>>> {
    let mut actors = Vec::new();
    for wrapper in element.children(builder.vocabulary().actor_wrapper) {
        let (position, size) = placement(wrapper)?;
        let model = builder.build_actor(wrapper)?;
        actors.push(Rc::new(ActorShape {
            model,
            position,
            size,
        }));
    }
    Ok(actors)
}
