//! Per-element model builders.
//!
//! [`ModelBuilder`] turns one XML element into one typed model object,
//! independent of every other element in the document. Cross-references
//! are never resolved here: link and message builders return carrier
//! structs that pair the model object with the raw identifiers a later
//! resolution pass will look up.
//!
//! Defaulting policy: optional text attributes default to the empty
//! string, toggles default to `false`, enumerations default to their
//! `Unspecified`-style variant. Structurally required attributes
//! (identifier, name) propagate an error instead, because continuing
//! without them would corrupt identifier scoping.

use log::{debug, warn};

use skein_core::geometry::{Point, Size};
use skein_core::model::{
    ActorModel, ClassModel, DisplayParameters, Field, InterfaceModel, LinkKind,
    LinkModel, Method, NoteModel, Parameter, SdInstanceModel, SdMessageModel,
    Stereotype, TextModel, UseCaseModel, Visibility,
};
use skein_core::shape::connector::AttachmentSide;

use crate::error::ParseResult;
use crate::vocabulary::{
    self, ATTR_ATTACHMENT_POINT, ATTR_CONTENT, ATTR_DEFAULT_VALUE, ATTR_DESCRIPTION,
    ATTR_ID, ATTR_IMPLEMENTING_CLASS, ATTR_INSTANCE_NAME, ATTR_LIFE_LINE_LENGTH,
    ATTR_MESSAGE, ATTR_NAME, ATTR_RETURN_TYPE, ATTR_STEREOTYPE, ATTR_TYPE,
    ATTR_VISIBILITY, ELEMENT_IMPLEMENTOR, ELEMENT_MODIFIER, ELEMENT_RETURN,
    ELEMENT_SOURCE_CODE, SchemaVersion, Vocabulary, int_or_zero,
    normalize_line_endings, to_bool, to_int,
};
use crate::xml::XmlElement;

/// Position and size read off a graphic wrapper element.
pub fn placement(wrapper: &XmlElement) -> ParseResult<(Point, Size)> {
    let x = to_int(wrapper.required_attribute("x")?, "x")?;
    let y = to_int(wrapper.required_attribute("y")?, "y")?;
    let width = to_int(wrapper.required_attribute("width")?, "width")?;
    let height = to_int(wrapper.required_attribute("height")?, "height")?;
    Ok((Point::new(x, y), Size::new(width, height)))
}

/// A link model plus the endpoint identifiers it still needs resolved.
#[derive(Debug, Clone)]
pub struct LinkFacts {
    pub model: LinkModel,
    pub source_id: i32,
    pub destination_id: i32,
}

/// A sequence message model plus the instance identifiers the wire format
/// stores on the wrapper rather than on the message itself.
#[derive(Debug, Clone)]
pub struct SdMessageFacts {
    pub model: SdMessageModel,
    pub source_id: i32,
    pub destination_id: i32,
}

/// Builds one model object per XML element.
///
/// Construction fixes the schema version; every method then reads wire
/// names from the vocabulary table and stays version-agnostic except for
/// the three structural differences (method return type, modifier
/// encoding, field nesting).
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder {
    version: SchemaVersion,
    vocabulary: Vocabulary,
}

impl ModelBuilder {
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            version,
            vocabulary: Vocabulary::new(version),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Build a class model from its graphic wrapper.
    pub fn build_class(&self, wrapper: &XmlElement) -> ParseResult<ClassModel> {
        let element = wrapper.exactly_one_child(self.vocabulary.class_element)?;

        let mut class = ClassModel::new(
            to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            element.required_attribute(ATTR_NAME)?,
        );

        class.description = optional(element, ATTR_DESCRIPTION);
        class.file_name = optional(element, self.vocabulary.attr_filename);
        class.stereotype = self.stereotype(element);
        class.display_parameters = self.display_parameters(element)?;
        class.show_methods = to_bool(element.attribute(self.vocabulary.attr_display_methods));
        class.show_fields = to_bool(element.attribute(self.vocabulary.attr_display_fields));
        class.show_stereotype =
            to_bool(element.attribute(self.vocabulary.attr_display_stereotype));

        class.methods = self.build_methods(element)?;
        class.fields = self.build_fields(element)?;

        debug!(name = class.name, id = class.id; "Built class model");
        Ok(class)
    }

    /// Build a note model from its graphic wrapper.
    pub fn build_note(&self, wrapper: &XmlElement) -> ParseResult<NoteModel> {
        let element = wrapper.exactly_one_child(self.vocabulary.note_element)?;
        Ok(NoteModel {
            id: to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            content: normalize_line_endings(&optional(element, ATTR_CONTENT)),
            file_name: optional(element, self.vocabulary.attr_filename),
        })
    }

    /// Build a free-standing text model from its graphic wrapper.
    pub fn build_text(&self, wrapper: &XmlElement) -> ParseResult<TextModel> {
        let element = wrapper.exactly_one_child(self.vocabulary.text_element)?;
        Ok(TextModel {
            id: to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            content: normalize_line_endings(&optional(element, ATTR_CONTENT)),
        })
    }

    /// Build an actor model from its graphic wrapper.
    pub fn build_actor(&self, wrapper: &XmlElement) -> ParseResult<ActorModel> {
        let element = wrapper.exactly_one_child(self.vocabulary.actor_element)?;
        Ok(ActorModel {
            id: to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            name: element.required_attribute(ATTR_NAME)?.to_string(),
            file_name: optional(element, self.vocabulary.attr_filename),
        })
    }

    /// Build a use-case model from its graphic wrapper.
    pub fn build_use_case(&self, wrapper: &XmlElement) -> ParseResult<UseCaseModel> {
        let element = wrapper.exactly_one_child(self.vocabulary.use_case_element)?;
        Ok(UseCaseModel {
            id: to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            name: element.required_attribute(ATTR_NAME)?.to_string(),
            file_name: optional(element, self.vocabulary.attr_filename),
        })
    }

    /// Build an interface model from the inner interface element of a
    /// lollipop wrapper.
    pub fn build_interface(&self, element: &XmlElement) -> ParseResult<InterfaceModel> {
        let mut interface = InterfaceModel::new(
            to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            element.required_attribute(ATTR_NAME)?,
        );
        interface.description = optional(element, ATTR_DESCRIPTION);

        for implementor in element.children(ELEMENT_IMPLEMENTOR) {
            interface
                .implementors
                .push(implementor.required_attribute(ATTR_IMPLEMENTING_CLASS)?.to_string());
        }

        // Interfaces carry methods with the exact same encoding classes use.
        interface.methods = self.build_methods(element)?;
        Ok(interface)
    }

    /// Build the model half of a link from the inner link element.
    /// Identifier resolution happens later, against the document's shape
    /// index; the returned facts carry the raw identifiers until then.
    pub fn build_link_facts(&self, element: &XmlElement) -> ParseResult<LinkFacts> {
        let kind = LinkKind::from_literal(element.required_attribute(ATTR_TYPE)?)?;

        let mut model = LinkModel::new(optional(element, ATTR_NAME), kind);
        model.source_cardinality =
            optional(element, self.vocabulary.attr_source_cardinality);
        model.destination_cardinality =
            optional(element, self.vocabulary.attr_destination_cardinality);
        model.bidirectional = to_bool(element.attribute(self.vocabulary.attr_bidirectional));

        Ok(LinkFacts {
            model,
            source_id: to_int(
                element.required_attribute(self.vocabulary.attr_link_source_id)?,
                self.vocabulary.attr_link_source_id,
            )?,
            destination_id: to_int(
                element.required_attribute(self.vocabulary.attr_link_destination_id)?,
                self.vocabulary.attr_link_destination_id,
            )?,
        })
    }

    /// Build a sequence instance model from its graphic wrapper.
    pub fn build_sd_instance(&self, wrapper: &XmlElement) -> ParseResult<SdInstanceModel> {
        let element = wrapper.exactly_one_child(self.vocabulary.sd_instance_element)?;
        Ok(SdInstanceModel {
            id: to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            instance_name: element.required_attribute(ATTR_INSTANCE_NAME)?.to_string(),
            life_line_length: int_or_zero(element.attribute(ATTR_LIFE_LINE_LENGTH)),
        })
    }

    /// Build a sequence message model plus its endpoint identifiers from
    /// its graphic wrapper. The message element itself carries the times
    /// and identifiers; the model-level instance references stay unset
    /// until resolution.
    pub fn build_sd_message_facts(&self, wrapper: &XmlElement) -> ParseResult<SdMessageFacts> {
        let element = wrapper.exactly_one_child(self.vocabulary.sd_message_element)?;

        let mut model = SdMessageModel {
            id: to_int(element.required_attribute(ATTR_ID)?, ATTR_ID)?,
            message: optional(element, ATTR_MESSAGE),
            ..SdMessageModel::default()
        };
        model.source_time = to_int(
            element.required_attribute(self.vocabulary.attr_message_source_time)?,
            self.vocabulary.attr_message_source_time,
        )?;
        model.destination_time = to_int(
            element.required_attribute(self.vocabulary.attr_message_destination_time)?,
            self.vocabulary.attr_message_destination_time,
        )?;

        Ok(SdMessageFacts {
            source_id: to_int(
                element.required_attribute(self.vocabulary.attr_message_source_id)?,
                self.vocabulary.attr_message_source_id,
            )?,
            destination_id: to_int(
                element.required_attribute(self.vocabulary.attr_message_destination_id)?,
                self.vocabulary.attr_message_destination_id,
            )?,
            model,
        })
    }

    /// The lollipop wrapper's anchor: position plus attachment side.
    pub fn lollipop_anchor(
        &self,
        wrapper: &XmlElement,
    ) -> ParseResult<(Point, AttachmentSide)> {
        let x = to_int(wrapper.required_attribute("x")?, "x")?;
        let y = to_int(wrapper.required_attribute("y")?, "y")?;
        let side =
            AttachmentSide::from_literal(wrapper.required_attribute(ATTR_ATTACHMENT_POINT)?)?;
        Ok((Point::new(x, y), side))
    }

    fn build_methods(&self, element: &XmlElement) -> ParseResult<Vec<Method>> {
        element
            .children(self.vocabulary.method_element)
            .map(|method| self.build_method(method))
            .collect()
    }

    /// Build one method. Public so interface and class loading share it.
    pub fn build_method(&self, element: &XmlElement) -> ParseResult<Method> {
        let mut method = Method::new(
            element.required_attribute(ATTR_NAME)?,
            self.visibility(element)?,
        );

        method.modifiers = self.build_modifiers(element)?;
        method.return_type = self.return_type(element);
        method.parameters = element
            .children(self.vocabulary.parameter_element)
            .map(|parameter| self.build_parameter(parameter))
            .collect::<ParseResult<_>>()?;
        method.source_code = source_code_lines(element);

        Ok(method)
    }

    fn build_parameter(&self, element: &XmlElement) -> ParseResult<Parameter> {
        Ok(Parameter::new(
            element.required_attribute(ATTR_NAME)?,
            optional(element, ATTR_TYPE),
            optional(element, ATTR_DEFAULT_VALUE),
        ))
    }

    fn build_fields(&self, element: &XmlElement) -> ParseResult<Vec<Field>> {
        element
            .children(self.vocabulary.field_element)
            .map(|field| self.build_field(field))
            .collect()
    }

    /// Build one field. V10 nests the name/type/default inside a single
    /// parameter child; V11 flattens them onto the field element.
    pub fn build_field(&self, element: &XmlElement) -> ParseResult<Field> {
        let visibility = self.visibility(element)?;

        let carrier = match self.version {
            SchemaVersion::V10 => element.exactly_one_child(self.vocabulary.parameter_element)?,
            SchemaVersion::V11 => element,
        };

        Ok(Field {
            name: carrier.required_attribute(ATTR_NAME)?.to_string(),
            visibility,
            field_type: optional(carrier, ATTR_TYPE),
            default_value: optional(carrier, ATTR_DEFAULT_VALUE),
        })
    }

    /// Normalize both modifier encodings into one ordered list: V10 packs
    /// every modifier into a single comma-delimited attribute, V11 writes
    /// one element per modifier. Order and duplicates are preserved.
    fn build_modifiers(&self, element: &XmlElement) -> ParseResult<Vec<String>> {
        let mut modifiers = Vec::new();
        match self.version {
            SchemaVersion::V10 => {
                if let Some(first) = element.first_child(ELEMENT_MODIFIER) {
                    let names = first.required_attribute(ATTR_NAME)?;
                    modifiers.extend(names.split(',').map(str::to_string));
                }
            }
            SchemaVersion::V11 => {
                for modifier in element.children(ELEMENT_MODIFIER) {
                    modifiers.push(modifier.required_attribute(ATTR_NAME)?.to_string());
                }
            }
        }
        Ok(modifiers)
    }

    /// V10 keeps the return type on a dedicated child element, V11 on an
    /// attribute. Absence means "no declared return type" in both.
    fn return_type(&self, element: &XmlElement) -> String {
        match self.version {
            SchemaVersion::V10 => element
                .first_child(ELEMENT_RETURN)
                .and_then(|ret| ret.attribute(ATTR_TYPE))
                .unwrap_or_default()
                .to_string(),
            SchemaVersion::V11 => optional(element, ATTR_RETURN_TYPE),
        }
    }

    fn visibility(&self, element: &XmlElement) -> ParseResult<Visibility> {
        match element.attribute(ATTR_VISIBILITY) {
            Some(literal) => Ok(Visibility::from_literal(literal)?),
            None => Ok(Visibility::default()),
        }
    }

    fn stereotype(&self, element: &XmlElement) -> Stereotype {
        match element.attribute(ATTR_STEREOTYPE) {
            None | Some("") => Stereotype::default(),
            Some(literal) => Stereotype::from_literal(literal).unwrap_or_else(|err| {
                // Legacy files carry free-form stereotypes; tolerate them.
                warn!(literal = err.literal(); "Unknown stereotype, using noStereotype");
                Stereotype::default()
            }),
        }
    }

    fn display_parameters(&self, element: &XmlElement) -> ParseResult<DisplayParameters> {
        match element.attribute(self.vocabulary.attr_display_parameters) {
            None | Some("") => Ok(DisplayParameters::default()),
            Some(literal) => Ok(DisplayParameters::from_literal(literal)?),
        }
    }
}

/// An optional text attribute, empty string when absent.
fn optional(element: &XmlElement, attribute: &str) -> String {
    element.attribute(attribute).unwrap_or_default().to_string()
}

/// The ordered source lines of a method. A method without a
/// `<SourceCode>` container and a method with an empty one both yield an
/// empty sequence.
fn source_code_lines(element: &XmlElement) -> Vec<String> {
    match element.first_child(ELEMENT_SOURCE_CODE) {
        Some(container) => container
            .children(vocabulary::ELEMENT_CODE)
            .map(|code| code.text().to_string())
            .collect(),
        None => Vec::new(),
    }
}
