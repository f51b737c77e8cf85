//! Sequence diagram assembly.
//!
//! Messages resolve against the instance index the same way links resolve
//! against the shape index, with one extra obligation: the wire format
//! stores the endpoint identifiers on the graphic wrapper while the
//! message model needs direct references to the instance models, so the
//! resolved references are copied onto the model in an explicit step
//! before the message shape is constructed.

use std::collections::HashMap;
use std::rc::Rc;

use log::error;

use skein_core::project::Document;
use skein_core::shape::connector::SdMessageShape;
use skein_core::shape::{LinkableShape, SdInstanceShape, ShapeId};

use crate::builder::{ModelBuilder, placement};
use crate::error::ParseResult;
use crate::links::{LinkResolver, ShapeIndex};
use crate::usecase::build_actor_shapes;
use crate::xml::XmlElement;

/// Assembles one sequence document: instances, then messages, then
/// actors and the actor-to-instance association links.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SequenceDiagramAssembler {
    builder: ModelBuilder,
    resolver: LinkResolver,
}

impl SequenceDiagramAssembler {
    pub(crate) fn new(builder: ModelBuilder, resolver: LinkResolver) -> Self {
        Self { builder, resolver }
    }

    pub(crate) fn assemble(
        &self,
        element: &XmlElement,
        document: &mut Document,
    ) -> ParseResult<()> {
        let instances = self.assemble_instances(element, document)?;
        self.assemble_messages(element, document, &instances)?;

        // Actors may point at instances; resolve those links over the
        // combined actors + instances map.
        document.actors = build_actor_shapes(&self.builder, element)?;

        let mut index = ShapeIndex::new();
        for actor in &document.actors {
            index.insert(LinkableShape::Actor(Rc::clone(actor)));
        }
        for instance in instances.values() {
            index.insert(LinkableShape::SdInstance(Rc::clone(instance)));
        }

        let resolved = self.resolver.resolve_document_links(element, &index)?;
        document.links = resolved.connectors;
        document.dropped_link_count += resolved.dropped;
        Ok(())
    }

    fn assemble_instances(
        &self,
        element: &XmlElement,
        document: &mut Document,
    ) -> ParseResult<HashMap<ShapeId, Rc<SdInstanceShape>>> {
        let mut instances = HashMap::new();
        for wrapper in element.children(self.builder.vocabulary().sd_instance_wrapper) {
            let (position, size) = placement(wrapper)?;
            let model = Rc::new(self.builder.build_sd_instance(wrapper)?);
            let shape = Rc::new(SdInstanceShape {
                model: Rc::clone(&model),
                position,
                size,
            });
            instances.insert(model.id, Rc::clone(&shape));
            document.sd_instances.push(shape);
        }
        Ok(instances)
    }

    fn assemble_messages(
        &self,
        element: &XmlElement,
        document: &mut Document,
        instances: &HashMap<ShapeId, Rc<SdInstanceShape>>,
    ) -> ParseResult<()> {
        for wrapper in element.children(self.builder.vocabulary().sd_message_wrapper) {
            let mut facts = self.builder.build_sd_message_facts(wrapper)?;

            let endpoints = instances
                .get(&facts.source_id)
                .zip(instances.get(&facts.destination_id));
            let Some((source, destination)) = endpoints else {
                error!(
                    source_id = facts.source_id,
                    destination_id = facts.destination_id,
                    message = facts.model.message;
                    "Dropping message with unresolved instance"
                );
                document.dropped_link_count += 1;
                continue;
            };

            // Explicit synchronization: the model gets the instance
            // references the wrapper only stored as identifiers.
            facts
                .model
                .attach_instances(Rc::clone(&source.model), Rc::clone(&destination.model));

            document.sd_messages.push(SdMessageShape {
                model: facts.model,
                source: Rc::clone(source),
                destination: Rc::clone(destination),
            });
        }
        Ok(())
    }
}
