//! Class members: methods, fields, parameters, and their visibility.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::UnknownEnumLiteral;

/// UML member visibility.
///
/// The legacy format writes either the spelled-out name (`PUBLIC`) or the
/// UML symbol (`+`); both are accepted. Absent visibility defaults to
/// `Public` in the loaders.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// Parse a wire literal, accepting names case-insensitively and the
    /// UML symbols `+`, `-`, `#`.
    pub fn from_literal(literal: &str) -> Result<Self, UnknownEnumLiteral> {
        match literal {
            "+" => return Ok(Self::Public),
            "-" => return Ok(Self::Private),
            "#" => return Ok(Self::Protected),
            _ => {}
        }
        match literal.to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "protected" => Ok(Self::Protected),
            _ => Err(UnknownEnumLiteral::new(literal, "Visibility")),
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Protected => "PROTECTED",
        };
        write!(f, "{s}")
    }
}

/// A single method parameter: name, declared type, and the default-value
/// literal exactly as written in the file (never evaluated).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub parameter_type: String,
    pub default_value: String,
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        parameter_type: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
            default_value: default_value.into(),
        }
    }
}

/// A method of a class or interface.
///
/// An empty `return_type` means "no declared return type", which is not
/// the same thing as `void`. `modifiers` preserves source order and
/// duplicates. `source_code` is the ordered sequence of stored source
/// lines; a method without stored source has an empty sequence rather
/// than a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    pub return_type: String,
    pub modifiers: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub source_code: Vec<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            ..Self::default()
        }
    }
}

/// A field of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub visibility: Visibility,
    pub field_type: String,
    pub default_value: String,
}
