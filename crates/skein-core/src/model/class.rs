//! Class model objects and their presentation enumerations.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::member::{Field, Method};
use super::UnknownEnumLiteral;

/// UML stereotype of a class.
///
/// Legacy files carry free-form stereotype strings; the known set below is
/// what the original tool ever wrote. Loaders tolerate unknown literals by
/// falling back to [`Stereotype::NoStereotype`] (with a warning) rather
/// than failing the whole document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stereotype {
    #[default]
    NoStereotype,
    Type,
    Interface,
    Metaclass,
    Auxiliary,
    Enumeration,
    DataType,
    Utility,
}

impl Stereotype {
    /// Parse a wire literal, case-insensitively.
    pub fn from_literal(literal: &str) -> Result<Self, UnknownEnumLiteral> {
        match literal.to_ascii_lowercase().as_str() {
            "nostereotype" | "no stereotype" => Ok(Self::NoStereotype),
            "type" => Ok(Self::Type),
            "interface" => Ok(Self::Interface),
            "metaclass" => Ok(Self::Metaclass),
            "auxiliary" => Ok(Self::Auxiliary),
            "enumeration" => Ok(Self::Enumeration),
            "datatype" => Ok(Self::DataType),
            "utility" => Ok(Self::Utility),
            _ => Err(UnknownEnumLiteral::new(literal, "Stereotype")),
        }
    }
}

impl Display for Stereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoStereotype => "noStereotype",
            Self::Type => "type",
            Self::Interface => "interface",
            Self::Metaclass => "metaclass",
            Self::Auxiliary => "auxiliary",
            Self::Enumeration => "enumeration",
            Self::DataType => "datatype",
            Self::Utility => "utility",
        };
        write!(f, "{s}")
    }
}

/// Whether method parameters are rendered for a class.
///
/// `Unspecified` defers to the application-wide preference; the two
/// explicit variants pin the choice per class. The V10 dialect wrote
/// `DISPLAY`/`DO_NOT_DISPLAY`, V11 writes `WITH_PARAMETERS`/
/// `WITHOUT_PARAMETERS`; both literal sets are accepted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayParameters {
    #[default]
    Unspecified,
    WithParameters,
    WithoutParameters,
}

impl DisplayParameters {
    /// Parse a wire literal from either dialect.
    pub fn from_literal(literal: &str) -> Result<Self, UnknownEnumLiteral> {
        match literal {
            "UNSPECIFIED" => Ok(Self::Unspecified),
            "WITH_PARAMETERS" | "DISPLAY" => Ok(Self::WithParameters),
            "WITHOUT_PARAMETERS" | "DO_NOT_DISPLAY" => Ok(Self::WithoutParameters),
            _ => Err(UnknownEnumLiteral::new(literal, "DisplayParameters")),
        }
    }
}

/// The model side of a class shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassModel {
    /// Document-local identifier; only meaningful within one document.
    pub id: i32,
    pub name: String,
    pub stereotype: Stereotype,
    pub description: String,
    pub file_name: String,
    pub display_parameters: DisplayParameters,
    pub show_methods: bool,
    pub show_fields: bool,
    pub show_stereotype: bool,
    pub methods: Vec<Method>,
    pub fields: Vec<Field>,
}

impl ClassModel {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}
