//! Cross-reference resolution: turning raw link elements plus a populated
//! shape index into fully connected, anchored connectors.
//!
//! Resolution is deliberately tolerant of dangling identifiers: legacy
//! files accumulate stale references, and one bad link must not sink a
//! whole diagram. A link whose endpoint cannot be found is logged with
//! both identifiers and its name, dropped from the result, and counted;
//! everything else in the document loads normally. Structural problems
//! (a missing inner element, an unknown relationship literal) are real
//! errors and propagate.

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use log::{error, warn};

use skein_core::geometry::Point;
use skein_core::model::LinkKind;
use skein_core::shape::connector::{
    Connector, ControlPoint, LinkLabels, LinkShape, LollipopShape,
};
use skein_core::shape::{LinkableShape, NoteShape, ShapeId};

use crate::builder::ModelBuilder;
use crate::error::{ParseError, ParseResult};
use crate::vocabulary::{
    ATTR_SPLINE, ELEMENT_CONTROL_POINT, ELEMENT_LABEL_CENTER, ELEMENT_LABEL_DESTINATION,
    ELEMENT_LABEL_SOURCE, to_bool, to_int,
};
use crate::xml::XmlElement;

/// Per-document mapping from locally unique identifier to materialized
/// shape.
///
/// Built incrementally while a document's shapes are assembled, then read
/// exhaustively once when links resolve. Notes additionally live in a
/// sub-map because note attachments mix a note endpoint with a non-note
/// endpoint and the two sides are looked up in different maps.
///
/// The main map preserves insertion order so that name scans bind to the
/// first shape in file order, the way the legacy loader did.
#[derive(Debug, Default)]
pub struct ShapeIndex {
    shapes: IndexMap<ShapeId, LinkableShape>,
    notes: HashMap<ShapeId, Rc<NoteShape>>,
}

impl ShapeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a shape under its model identifier.
    pub fn insert(&mut self, shape: LinkableShape) {
        if let LinkableShape::Note(note) = &shape {
            self.notes.insert(note.model.id, Rc::clone(note));
        }
        self.shapes.insert(shape.id(), shape);
    }

    /// Number of indexed shapes (notes included).
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn get(&self, id: ShapeId) -> Option<&LinkableShape> {
        self.shapes.get(&id)
    }

    fn get_note(&self, id: ShapeId) -> Option<&Rc<NoteShape>> {
        self.notes.get(&id)
    }

    /// Scan for a shape whose model name matches, first match wins.
    /// The match count is returned alongside so callers can diagnose
    /// duplicate names without changing the first-wins contract.
    fn find_by_name(&self, name: &str) -> (Option<LinkableShape>, usize) {
        let mut found = None;
        let mut matches = 0;
        for shape in self.shapes.values() {
            if shape.name() == name {
                matches += 1;
                if found.is_none() {
                    found = Some(shape.clone());
                }
            }
        }
        (found, matches)
    }
}

/// What one document's link pass produced: the connectors that resolved
/// and the count of link elements dropped for dangling references.
#[derive(Debug, Default)]
pub struct ResolvedLinks {
    pub connectors: Vec<Connector>,
    pub dropped: usize,
}

/// Resolves a document's link elements against its [`ShapeIndex`].
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver {
    builder: ModelBuilder,
}

impl LinkResolver {
    pub fn new(builder: ModelBuilder) -> Self {
        Self { builder }
    }

    /// Resolve every link and lollipop element of one document, in file
    /// order. Dangling references drop the affected link only.
    pub fn resolve_document_links(
        &self,
        document: &XmlElement,
        index: &ShapeIndex,
    ) -> ParseResult<ResolvedLinks> {
        let vocabulary = self.builder.vocabulary();
        let mut resolved = ResolvedLinks::default();

        for wrapper in document.children(vocabulary.link_wrapper) {
            match self.resolve_link(wrapper, index)? {
                Some(link) => resolved.connectors.push(Connector::Link(link)),
                None => resolved.dropped += 1,
            }
        }

        for wrapper in document.children(vocabulary.lollipop_wrapper) {
            match self.resolve_lollipop(wrapper, index)? {
                Some(lollipop) => resolved.connectors.push(Connector::Lollipop(lollipop)),
                None => resolved.dropped += 1,
            }
        }

        Ok(resolved)
    }

    /// Resolve one classic two-endpoint link. Returns `Ok(None)` when an
    /// endpoint identifier has no entry in the index.
    pub fn resolve_link(
        &self,
        wrapper: &XmlElement,
        index: &ShapeIndex,
    ) -> ParseResult<Option<LinkShape>> {
        let vocabulary = self.builder.vocabulary();

        let source_anchor = Point::new(
            to_int(wrapper.required_attribute("srcX")?, "srcX")?,
            to_int(wrapper.required_attribute("srcY")?, "srcY")?,
        );
        let destination_anchor = Point::new(
            to_int(wrapper.required_attribute("dstX")?, "dstX")?,
            to_int(wrapper.required_attribute("dstY")?, "dstY")?,
        );
        let spline = to_bool(wrapper.attribute(ATTR_SPLINE));

        let element = wrapper.exactly_one_child(vocabulary.link_element)?;
        let facts = self.builder.build_link_facts(element)?;

        // Messages have their own resolution path keyed off sequence
        // instances; a message inside a generic link wrapper is corrupt.
        if facts.model.kind == LinkKind::SdMessage {
            return Err(ParseError::malformed(
                vocabulary.link_wrapper,
                "sequence messages cannot appear as generic links",
            ));
        }

        // Note attachments put the note on the source side and look the
        // destination up among the regular shapes.
        let endpoints = if facts.model.kind == LinkKind::NoteLink {
            index
                .get_note(facts.source_id)
                .map(|note| LinkableShape::Note(Rc::clone(note)))
                .zip(index.get(facts.destination_id).cloned())
        } else {
            index
                .get(facts.source_id)
                .cloned()
                .zip(index.get(facts.destination_id).cloned())
        };

        let Some((source, destination)) = endpoints else {
            error!(
                source_id = facts.source_id,
                destination_id = facts.destination_id,
                name = facts.model.name,
                kind:% = facts.model.kind;
                "Dropping link with unresolved endpoint"
            );
            return Ok(None);
        };

        let control_points = self.control_points(wrapper, &source, &destination)?;
        let labels = link_labels(wrapper)?;

        Ok(Some(LinkShape {
            model: facts.model,
            source,
            destination,
            source_anchor,
            destination_anchor,
            spline,
            control_points,
            labels,
        }))
    }

    /// Resolve one lollipop interface realization. The implementor is
    /// found by model name, not identifier; `Ok(None)` when no shape
    /// carries the name.
    pub fn resolve_lollipop(
        &self,
        wrapper: &XmlElement,
        index: &ShapeIndex,
    ) -> ParseResult<Option<LollipopShape>> {
        let vocabulary = self.builder.vocabulary();

        let (anchor, side) = self.builder.lollipop_anchor(wrapper)?;
        let element = wrapper.exactly_one_child(vocabulary.interface_element)?;
        let interface = self.builder.build_interface(element)?;

        let Some(implementor_name) = interface.primary_implementor() else {
            return Err(ParseError::malformed(
                vocabulary.interface_element,
                "interface names no implementor",
            ));
        };

        let (found, matches) = index.find_by_name(implementor_name);
        if matches > 1 {
            warn!(
                implementor = implementor_name,
                matches,
                interface = interface.name;
                "Implementor name is ambiguous, binding to the first match"
            );
        }

        let Some(implementor) = found else {
            error!(
                implementor = implementor_name,
                interface = interface.name;
                "Dropping lollipop with unresolved implementor"
            );
            return Ok(None);
        };

        Ok(Some(LollipopShape {
            interface,
            anchor,
            side,
            implementor,
        }))
    }

    /// Materialize the wrapper's control points in file order. For a
    /// self-loop each point is reparented to the looping shape so it moves
    /// with it; otherwise points stay unparented.
    fn control_points(
        &self,
        wrapper: &XmlElement,
        source: &LinkableShape,
        destination: &LinkableShape,
    ) -> ParseResult<Vec<ControlPoint>> {
        let self_loop = source.is_same_shape(destination);

        let mut points = Vec::new();
        for element in wrapper.children(ELEMENT_CONTROL_POINT) {
            let mut point = ControlPoint::new(Point::new(
                to_int(element.required_attribute("x")?, "x")?,
                to_int(element.required_attribute("y")?, "y")?,
            ));
            if self_loop {
                point.parent = Some(source.clone());
            }
            points.push(point);
        }
        Ok(points)
    }
}

fn label_position(wrapper: &XmlElement, name: &str) -> ParseResult<Option<Point>> {
    match wrapper.first_child(name) {
        Some(label) => Ok(Some(Point::new(
            to_int(label.required_attribute("x")?, "x")?,
            to_int(label.required_attribute("y")?, "y")?,
        ))),
        None => Ok(None),
    }
}

fn link_labels(wrapper: &XmlElement) -> ParseResult<LinkLabels> {
    Ok(LinkLabels {
        center: label_position(wrapper, ELEMENT_LABEL_CENTER)?,
        source: label_position(wrapper, ELEMENT_LABEL_SOURCE)?,
        destination: label_position(wrapper, ELEMENT_LABEL_DESTINATION)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::SchemaVersion;
    use crate::xml::parse_document;
    use skein_core::geometry::Size;
    use skein_core::model::ClassModel;
    use skein_core::shape::ClassShape;

    fn indexed_class(index: &mut ShapeIndex, id: i32, name: &str) -> Rc<ClassShape> {
        let shape = Rc::new(ClassShape {
            model: ClassModel::new(id, name),
            position: Point::new(0, 0),
            size: Size::new(100, 50),
        });
        index.insert(LinkableShape::Class(Rc::clone(&shape)));
        shape
    }

    fn resolver() -> LinkResolver {
        LinkResolver::new(ModelBuilder::new(SchemaVersion::V10))
    }

    fn link_wrapper(xml: &str) -> XmlElement {
        parse_document(xml).expect("Failed to parse")
    }

    #[test]
    fn resolves_a_classic_link() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 1, "A");
        indexed_class(&mut index, 2, "B");

        let wrapper = link_wrapper(
            r#"<GraphicLink srcX="10" srcY="20" dstX="30" dstY="40" spline="False">
                 <Link name="inherits" type="INHERITANCE" cardSrc="" cardDestination=""
                       bidir="False" sourceId="1" destId="2"/>
               </GraphicLink>"#,
        );

        let link = resolver()
            .resolve_link(&wrapper, &index)
            .expect("Failed to resolve")
            .expect("link should resolve");

        assert_eq!(link.kind(), LinkKind::Inheritance);
        assert_eq!(link.source_anchor, Point::new(10, 20));
        assert_eq!(link.destination_anchor, Point::new(30, 40));
        assert_eq!(link.source.id(), 1);
        assert_eq!(link.destination.id(), 2);
        assert!(!link.spline);
        assert!(!link.is_self_loop());
    }

    #[test]
    fn dangling_destination_drops_the_link_without_error() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 1, "A");

        let wrapper = link_wrapper(
            r#"<GraphicLink srcX="0" srcY="0" dstX="0" dstY="0" spline="False">
                 <Link name="stale" type="ASSOCIATION" cardSrc="" cardDestination=""
                       bidir="False" sourceId="1" destId="99"/>
               </GraphicLink>"#,
        );

        let outcome = resolver().resolve_link(&wrapper, &index).expect("no error");
        assert!(outcome.is_none(), "dangling link must be dropped, not raised");
    }

    #[test]
    fn self_loop_reparents_every_control_point() {
        let mut index = ShapeIndex::new();
        let shape = indexed_class(&mut index, 1, "A");

        let wrapper = link_wrapper(
            r#"<GraphicLink srcX="0" srcY="0" dstX="5" dstY="5" spline="False">
                 <ControlPoint x="60" y="10"/>
                 <ControlPoint x="60" y="50"/>
                 <Link name="self" type="ASSOCIATION" cardSrc="" cardDestination=""
                       bidir="False" sourceId="1" destId="1"/>
               </GraphicLink>"#,
        );

        let link = resolver()
            .resolve_link(&wrapper, &index)
            .expect("Failed to resolve")
            .expect("link should resolve");

        assert!(link.is_self_loop());
        assert_eq!(link.control_points.len(), 2);
        for point in &link.control_points {
            let parent = point.parent.as_ref().expect("must be reparented");
            assert!(parent.is_same_shape(&LinkableShape::Class(Rc::clone(&shape))));
        }
    }

    #[test]
    fn distinct_endpoints_leave_control_points_unparented() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 1, "A");
        indexed_class(&mut index, 2, "B");

        let wrapper = link_wrapper(
            r#"<GraphicLink srcX="0" srcY="0" dstX="5" dstY="5" spline="True">
                 <ControlPoint x="60" y="10"/>
                 <Link name="" type="AGGREGATION" cardSrc="" cardDestination=""
                       bidir="False" sourceId="1" destId="2"/>
               </GraphicLink>"#,
        );

        let link = resolver()
            .resolve_link(&wrapper, &index)
            .expect("Failed to resolve")
            .expect("link should resolve");

        assert!(link.spline);
        assert!(link.control_points[0].parent.is_none());
    }

    #[test]
    fn note_link_mixes_the_two_maps() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 2, "Target");
        let note = Rc::new(NoteShape {
            model: skein_core::model::NoteModel {
                id: 7,
                content: "remember".to_string(),
                file_name: String::new(),
            },
            position: Point::new(0, 0),
            size: Size::new(80, 40),
        });
        index.insert(LinkableShape::Note(Rc::clone(&note)));

        let wrapper = link_wrapper(
            r#"<GraphicLink srcX="0" srcY="0" dstX="1" dstY="1" spline="False">
                 <Link name="" type="NOTELINK" cardSrc="" cardDestination=""
                       bidir="False" sourceId="7" destId="2"/>
               </GraphicLink>"#,
        );

        let link = resolver()
            .resolve_link(&wrapper, &index)
            .expect("Failed to resolve")
            .expect("link should resolve");

        assert!(matches!(link.source, LinkableShape::Note(_)));
        assert!(matches!(link.destination, LinkableShape::Class(_)));
    }

    #[test]
    fn message_kind_is_rejected_from_the_generic_path() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 1, "A");

        let wrapper = link_wrapper(
            r#"<GraphicLink srcX="0" srcY="0" dstX="1" dstY="1" spline="False">
                 <Link name="" type="SD_MESSAGE" cardSrc="" cardDestination=""
                       bidir="False" sourceId="1" destId="1"/>
               </GraphicLink>"#,
        );

        assert!(resolver().resolve_link(&wrapper, &index).is_err());
    }

    #[test]
    fn lollipop_binds_to_first_matching_name() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 1, "File");

        let wrapper = link_wrapper(
            r#"<GraphicLollipop x="120" y="60" attachmentPoint="EAST">
                 <Interface id="9" name="Closeable" description="">
                   <Implementor implementingClassName="File"/>
                 </Interface>
               </GraphicLollipop>"#,
        );

        let lollipop = resolver()
            .resolve_lollipop(&wrapper, &index)
            .expect("Failed to resolve")
            .expect("lollipop should resolve");

        assert_eq!(lollipop.interface.name, "Closeable");
        assert_eq!(lollipop.anchor, Point::new(120, 60));
        assert_eq!(lollipop.implementor.name(), "File");
    }

    #[test]
    fn duplicate_implementor_names_bind_to_the_first_in_file_order() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 5, "Dup");
        indexed_class(&mut index, 3, "Dup");

        let wrapper = link_wrapper(
            r#"<GraphicLollipop x="0" y="0" attachmentPoint="WEST">
                 <Interface id="9" name="I" description="">
                   <Implementor implementingClassName="Dup"/>
                 </Interface>
               </GraphicLollipop>"#,
        );

        let lollipop = resolver()
            .resolve_lollipop(&wrapper, &index)
            .expect("Failed to resolve")
            .expect("lollipop should resolve");

        // Both shapes carry the name; the earlier-indexed one wins.
        assert_eq!(lollipop.implementor.id(), 5);
    }

    #[test]
    fn lollipop_with_unknown_implementor_is_dropped() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 1, "Other");

        let wrapper = link_wrapper(
            r#"<GraphicLollipop x="0" y="0" attachmentPoint="NORTH">
                 <Interface id="9" name="Closeable" description="">
                   <Implementor implementingClassName="File"/>
                 </Interface>
               </GraphicLollipop>"#,
        );

        let outcome = resolver()
            .resolve_lollipop(&wrapper, &index)
            .expect("no error");
        assert!(outcome.is_none());
    }

    #[test]
    fn labels_are_read_when_present() {
        let mut index = ShapeIndex::new();
        indexed_class(&mut index, 1, "A");
        indexed_class(&mut index, 2, "B");

        let wrapper = link_wrapper(
            r#"<GraphicLink srcX="0" srcY="0" dstX="1" dstY="1" spline="False">
                 <LabelCenter x="555" y="281"/>
                 <LabelSrc x="100" y="200"/>
                 <LabelDst x="300" y="400"/>
                 <Link name="Kicks Butt" type="ASSOCIATION" cardSrc="" cardDestination=""
                       bidir="False" sourceId="1" destId="2"/>
               </GraphicLink>"#,
        );

        let link = resolver()
            .resolve_link(&wrapper, &index)
            .expect("Failed to resolve")
            .expect("link should resolve");

        assert_eq!(link.labels.center, Some(Point::new(555, 281)));
        assert_eq!(link.labels.source, Some(Point::new(100, 200)));
        assert_eq!(link.labels.destination, Some(Point::new(300, 400)));
    }
}
