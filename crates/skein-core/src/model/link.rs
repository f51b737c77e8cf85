//! Link model objects: the UML relationship carried by a connector.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::UnknownEnumLiteral;

/// The UML relationship kind of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkKind {
    Association,
    Aggregation,
    Composition,
    Inheritance,
    /// Classic two-shape interface realization (dashed triangle arrow).
    Interface,
    /// Attachment between a note and another shape.
    NoteLink,
    /// Sequence-diagram message; never constructed through the generic
    /// link path.
    SdMessage,
}

impl LinkKind {
    /// Parse the wire literal (`ASSOCIATION`, `SD_MESSAGE`, ...).
    pub fn from_literal(literal: &str) -> Result<Self, UnknownEnumLiteral> {
        match literal {
            "ASSOCIATION" => Ok(Self::Association),
            "AGGREGATION" => Ok(Self::Aggregation),
            "COMPOSITION" => Ok(Self::Composition),
            "INHERITANCE" => Ok(Self::Inheritance),
            "INTERFACE" => Ok(Self::Interface),
            "NOTELINK" => Ok(Self::NoteLink),
            "SD_MESSAGE" => Ok(Self::SdMessage),
            _ => Err(UnknownEnumLiteral::new(literal, "LinkKind")),
        }
    }
}

impl Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Association => "ASSOCIATION",
            Self::Aggregation => "AGGREGATION",
            Self::Composition => "COMPOSITION",
            Self::Inheritance => "INHERITANCE",
            Self::Interface => "INTERFACE",
            Self::NoteLink => "NOTELINK",
            Self::SdMessage => "SD_MESSAGE",
        };
        write!(f, "{s}")
    }
}

/// The model side of a connector: relationship kind, label, cardinalities.
///
/// Cardinalities are plain strings because the legacy format never
/// distinguishes "absent" from "empty"; both load as `""`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkModel {
    pub name: String,
    pub kind: LinkKind,
    pub source_cardinality: String,
    pub destination_cardinality: String,
    pub bidirectional: bool,
}

impl LinkModel {
    pub fn new(name: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            name: name.into(),
            kind,
            source_cardinality: String::new(),
            destination_cardinality: String::new(),
            bidirectional: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_kind_round_trips_through_display() {
        for kind in [
            LinkKind::Association,
            LinkKind::Aggregation,
            LinkKind::Composition,
            LinkKind::Inheritance,
            LinkKind::Interface,
            LinkKind::NoteLink,
            LinkKind::SdMessage,
        ] {
            assert_eq!(LinkKind::from_literal(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn link_kind_rejects_unknown() {
        assert!(LinkKind::from_literal("FRIENDSHIP").is_err());
    }
}
