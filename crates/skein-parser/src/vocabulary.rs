//! Schema versions, wire-name tables, and primitive coercions.
//!
//! The two legacy dialects name the same concepts differently (element
//! names, identifier attributes, cardinality attributes). All of that
//! variance is confined to [`Vocabulary`]: higher layers ask the table
//! for a name and never branch on the version themselves.
//!
//! Coercions are pure functions with the defaults the legacy files rely
//! on; the complete optional/required attribute table lives in the
//! repository's design notes.

use std::fmt::{self, Display};

use crate::error::{ParseError, ParseResult};

/// The newline marker the legacy format embeds in note/text content.
const END_OF_LINE_MARKER: &str = "&#xA;";

/// The two XML dialects this parser reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// Original dialect: `GraphicClass`/`Class` wrappers, `cardSrc`-style
    /// attribute names, comma-delimited modifiers.
    V10,
    /// Current dialect: `OglClass`/`PyutClass` wrappers, spelled-out
    /// attribute names, one element per modifier.
    V11,
}

impl SchemaVersion {
    /// Parse the project root's `version` attribute.
    pub fn from_version_attribute(value: &str) -> ParseResult<Self> {
        match value.trim() {
            "10" => Ok(Self::V10),
            "11" => Ok(Self::V11),
            _ => Err(ParseError::UnsupportedVersion {
                version: value.to_string(),
            }),
        }
    }
}

impl Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::V10 => "10",
            Self::V11 => "11",
        };
        write!(f, "{s}")
    }
}

// Names shared by both dialects.
pub const ELEMENT_PROJECT: &str = "PyutProject";
pub const ELEMENT_DOCUMENT: &str = "PyutDocument";
pub const ELEMENT_MODIFIER: &str = "Modifier";
pub const ELEMENT_SOURCE_CODE: &str = "SourceCode";
pub const ELEMENT_CODE: &str = "Code";
pub const ELEMENT_RETURN: &str = "Return";
pub const ELEMENT_IMPLEMENTOR: &str = "Implementor";
pub const ELEMENT_CONTROL_POINT: &str = "ControlPoint";
pub const ELEMENT_LABEL_CENTER: &str = "LabelCenter";
pub const ELEMENT_LABEL_SOURCE: &str = "LabelSrc";
pub const ELEMENT_LABEL_DESTINATION: &str = "LabelDst";

pub const ATTR_ID: &str = "id";
pub const ATTR_NAME: &str = "name";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_DESCRIPTION: &str = "description";
pub const ATTR_CONTENT: &str = "content";
pub const ATTR_VISIBILITY: &str = "visibility";
pub const ATTR_DEFAULT_VALUE: &str = "defaultValue";
pub const ATTR_RETURN_TYPE: &str = "returnType";
pub const ATTR_INSTANCE_NAME: &str = "instanceName";
pub const ATTR_LIFE_LINE_LENGTH: &str = "lifeLineLength";
pub const ATTR_MESSAGE: &str = "message";
pub const ATTR_IMPLEMENTING_CLASS: &str = "implementingClassName";
pub const ATTR_ATTACHMENT_POINT: &str = "attachmentPoint";
pub const ATTR_SPLINE: &str = "spline";
pub const ATTR_STEREOTYPE: &str = "stereotype";

/// Version-dependent wire names, resolved once per load.
///
/// Field pairs follow the wrapper/inner convention of the format: the
/// wrapper element carries geometry, the inner element carries the model
/// attributes.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub class_wrapper: &'static str,
    pub class_element: &'static str,
    pub note_wrapper: &'static str,
    pub note_element: &'static str,
    pub text_wrapper: &'static str,
    pub text_element: &'static str,
    pub actor_wrapper: &'static str,
    pub actor_element: &'static str,
    pub use_case_wrapper: &'static str,
    pub use_case_element: &'static str,
    pub link_wrapper: &'static str,
    pub link_element: &'static str,
    pub lollipop_wrapper: &'static str,
    pub interface_element: &'static str,
    pub sd_instance_wrapper: &'static str,
    pub sd_instance_element: &'static str,
    pub sd_message_wrapper: &'static str,
    pub sd_message_element: &'static str,
    pub method_element: &'static str,
    pub parameter_element: &'static str,
    pub field_element: &'static str,
    pub attr_filename: &'static str,
    pub attr_display_methods: &'static str,
    pub attr_display_fields: &'static str,
    pub attr_display_stereotype: &'static str,
    pub attr_display_parameters: &'static str,
    pub attr_source_cardinality: &'static str,
    pub attr_destination_cardinality: &'static str,
    pub attr_bidirectional: &'static str,
    pub attr_link_source_id: &'static str,
    pub attr_link_destination_id: &'static str,
    pub attr_message_source_id: &'static str,
    pub attr_message_destination_id: &'static str,
    pub attr_message_source_time: &'static str,
    pub attr_message_destination_time: &'static str,
}

impl Vocabulary {
    /// The name table for the given schema version.
    pub fn new(version: SchemaVersion) -> Self {
        match version {
            SchemaVersion::V10 => Self {
                class_wrapper: "GraphicClass",
                class_element: "Class",
                note_wrapper: "GraphicNote",
                note_element: "Note",
                text_wrapper: "GraphicText",
                text_element: "Text",
                actor_wrapper: "GraphicActor",
                actor_element: "Actor",
                use_case_wrapper: "GraphicUseCase",
                use_case_element: "UseCase",
                link_wrapper: "GraphicLink",
                link_element: "Link",
                lollipop_wrapper: "GraphicLollipop",
                interface_element: "Interface",
                sd_instance_wrapper: "GraphicSDInstance",
                sd_instance_element: "SDInstance",
                sd_message_wrapper: "GraphicSDMessage",
                sd_message_element: "SDMessage",
                method_element: "Method",
                parameter_element: "Param",
                field_element: "Field",
                attr_filename: "filename",
                attr_display_methods: "showMethods",
                attr_display_fields: "showFields",
                attr_display_stereotype: "showStereoType",
                attr_display_parameters: "displayParameters",
                attr_source_cardinality: "cardSrc",
                attr_destination_cardinality: "cardDestination",
                attr_bidirectional: "bidir",
                attr_link_source_id: "sourceId",
                attr_link_destination_id: "destId",
                attr_message_source_id: "srcID",
                attr_message_destination_id: "dstID",
                attr_message_source_time: "srcTime",
                attr_message_destination_time: "dstTime",
            },
            SchemaVersion::V11 => Self {
                class_wrapper: "OglClass",
                class_element: "PyutClass",
                note_wrapper: "OglNote",
                note_element: "PyutNote",
                text_wrapper: "OglText",
                text_element: "PyutText",
                actor_wrapper: "OglActor",
                actor_element: "PyutActor",
                use_case_wrapper: "OglUseCase",
                use_case_element: "PyutUseCase",
                link_wrapper: "OglLink",
                link_element: "PyutLink",
                lollipop_wrapper: "OglInterface2",
                interface_element: "PyutInterface",
                sd_instance_wrapper: "OglSDInstance",
                sd_instance_element: "PyutSDInstance",
                sd_message_wrapper: "OglSDMessage",
                sd_message_element: "PyutSDMessage",
                method_element: "PyutMethod",
                parameter_element: "PyutParameter",
                field_element: "PyutField",
                attr_filename: "fileName",
                attr_display_methods: "displayMethods",
                attr_display_fields: "displayFields",
                attr_display_stereotype: "displayStereotype",
                attr_display_parameters: "displayParameters",
                attr_source_cardinality: "cardinalitySource",
                attr_destination_cardinality: "cardinalityDestination",
                attr_bidirectional: "bidirectional",
                attr_link_source_id: "sourceID",
                attr_link_destination_id: "destinationID",
                attr_message_source_id: "sourceID",
                attr_message_destination_id: "destinationID",
                attr_message_source_time: "sourceTime",
                attr_message_destination_time: "destinationTime",
            },
        }
    }
}

/// Convert a known set of truthy strings to a boolean.
///
/// Case-insensitive `yes`, `true`, `t`, `1` are true; anything else,
/// including an absent attribute, is false.
pub fn to_bool(raw: Option<&str>) -> bool {
    match raw {
        Some(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "yes" | "true" | "t" | "1"
        ),
        None => false,
    }
}

/// Parse a required integer attribute value.
pub fn to_int(raw: &str, attribute: &'static str) -> ParseResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            attribute,
            value: raw.to_string(),
        })
}

/// Parse an optional integer attribute, defaulting to zero on absence or
/// garbage. Used for layout metadata where the legacy writers were
/// inconsistent about emitting the attribute at all.
pub fn int_or_zero(raw: Option<&str>) -> i32 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

/// Replace each embedded legacy newline marker with `\n`.
///
/// Content is otherwise untouched: no trimming, and consecutive markers
/// produce consecutive newlines.
pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace(END_OF_LINE_MARKER, "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn version_dispatch() {
        assert_eq!(
            SchemaVersion::from_version_attribute("10").unwrap(),
            SchemaVersion::V10
        );
        assert_eq!(
            SchemaVersion::from_version_attribute("11").unwrap(),
            SchemaVersion::V11
        );
        assert!(matches!(
            SchemaVersion::from_version_attribute("12"),
            Err(ParseError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn vocabulary_differs_where_the_dialects_differ() {
        let v10 = Vocabulary::new(SchemaVersion::V10);
        let v11 = Vocabulary::new(SchemaVersion::V11);

        assert_eq!(v10.class_wrapper, "GraphicClass");
        assert_eq!(v11.class_wrapper, "OglClass");
        assert_eq!(v10.attr_source_cardinality, "cardSrc");
        assert_eq!(v11.attr_source_cardinality, "cardinalitySource");
        assert_eq!(v10.attr_display_methods, "showMethods");
        assert_eq!(v11.attr_display_methods, "displayMethods");
        // displayParameters kept the same spelling across dialects
        assert_eq!(v10.attr_display_parameters, v11.attr_display_parameters);
    }

    #[test]
    fn truthy_strings() {
        for value in ["yes", "TRUE", "True", "t", "1", "YES"] {
            assert!(to_bool(Some(value)), "{value} should be true");
        }
        for value in ["no", "false", "0", "", "2", "on"] {
            assert!(!to_bool(Some(value)), "{value} should be false");
        }
        assert!(!to_bool(None));
    }

    #[test]
    fn line_ending_normalization() {
        assert_eq!(
            normalize_line_endings("line 1&#xA;line 2&#xA;line 3"),
            "line 1\nline 2\nline 3"
        );
        // consecutive markers are not collapsed
        assert_eq!(normalize_line_endings("a&#xA;&#xA;b"), "a\n\nb");
        // untouched content stays byte-identical
        assert_eq!(normalize_line_endings("  spaced  "), "  spaced  ");
    }

    #[test]
    fn int_parsing() {
        assert_eq!(to_int("42", "x").unwrap(), 42);
        assert_eq!(to_int(" -7 ", "x").unwrap(), -7);
        assert!(matches!(
            to_int("4.2", "x"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert_eq!(int_or_zero(None), 0);
        assert_eq!(int_or_zero(Some("bogus")), 0);
        assert_eq!(int_or_zero(Some("20")), 20);
    }

    proptest! {
        /// Content without the marker passes through unchanged.
        #[test]
        fn normalization_is_identity_without_marker(s in "[^&]*") {
            prop_assert_eq!(normalize_line_endings(&s), s);
        }

        /// Line count equals marker count plus one.
        #[test]
        fn normalization_preserves_segments(segments in proptest::collection::vec("[a-z ]{0,8}", 1..5)) {
            let joined = segments.join("&#xA;");
            let normalized = normalize_line_endings(&joined);
            prop_assert_eq!(normalized.split('\n').count(), segments.len());
        }
    }
}
