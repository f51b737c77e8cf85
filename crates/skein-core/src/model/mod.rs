//! Model objects reconstructed from a legacy diagram file.
//!
//! Every visual shape in a document pairs with exactly one of these model
//! objects; the shape carries geometry, the model carries meaning. Models
//! are plain data and never reference the shapes that display them (the
//! one deliberate exception is [`sequence::SdMessageModel`], which holds
//! direct references to its endpoint instance models after resolution).

mod annotation;
mod class;
mod interface;
mod link;
mod member;
mod sequence;
mod usecase;

pub use annotation::{NoteModel, TextModel};
pub use class::{ClassModel, DisplayParameters, Stereotype};
pub use interface::InterfaceModel;
pub use link::{LinkKind, LinkModel};
pub use member::{Field, Method, Parameter, Visibility};
pub use sequence::{SdInstanceModel, SdMessageModel};
pub use usecase::{ActorModel, UseCaseModel};

use thiserror::Error;

/// A string literal did not match any variant of the target enumeration.
///
/// Raised by the `from_literal` constructors on the model enums. Callers
/// decide whether to propagate or substitute a default; see the individual
/// enum documentation for the policy each loader applies.
#[derive(Debug, Error)]
#[error("unknown {enum_name} literal: {literal:?}")]
pub struct UnknownEnumLiteral {
    literal: String,
    enum_name: &'static str,
}

impl UnknownEnumLiteral {
    pub(crate) fn new(literal: &str, enum_name: &'static str) -> Self {
        Self {
            literal: literal.to_string(),
            enum_name,
        }
    }

    /// The literal that failed to match.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Name of the enumeration the literal was checked against.
    pub fn enum_name(&self) -> &'static str {
        self.enum_name
    }
}
