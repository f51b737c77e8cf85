//! Positioned, sized shapes paired 1:1 with model objects.
//!
//! Shapes are the graphical half of a loaded document. Each shape owns its
//! model object and its geometry; connectors reference shapes through
//! [`LinkableShape`], so shapes are wrapped in [`Rc`] by the document that
//! owns them. Nothing here draws - rendering belongs to whatever canvas
//! the caller attaches the result to.

pub mod connector;

use std::fmt::{self, Display};
use std::rc::Rc;

use crate::geometry::{Point, Size};
use crate::model::{
    ActorModel, ClassModel, NoteModel, SdInstanceModel, TextModel, UseCaseModel,
};

/// Document-local shape identifier.
///
/// Only unique within one document; two documents in the same project may
/// reuse the same value for unrelated shapes.
pub type ShapeId = i32;

/// A class shape: a [`ClassModel`] with a position and size.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassShape {
    pub model: ClassModel,
    pub position: Point,
    pub size: Size,
}

/// A note shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteShape {
    pub model: NoteModel,
    pub position: Point,
    pub size: Size,
}

/// A free-standing text shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub model: TextModel,
    pub position: Point,
    pub size: Size,
}

/// An actor shape in a use-case or sequence diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorShape {
    pub model: ActorModel,
    pub position: Point,
    pub size: Size,
}

/// A use-case shape.
#[derive(Debug, Clone, PartialEq)]
pub struct UseCaseShape {
    pub model: UseCaseModel,
    pub position: Point,
    pub size: Size,
}

/// A sequence-diagram instance (lifeline head) shape.
///
/// The model is `Rc`-shared because resolved messages hold direct
/// references to their endpoint instance models.
#[derive(Debug, Clone)]
pub struct SdInstanceShape {
    pub model: Rc<SdInstanceModel>,
    pub position: Point,
    pub size: Size,
}

/// Any shape a connector endpoint can resolve to.
///
/// Holds an `Rc` to the shape owned by the document, so cloning is cheap
/// and the document remains the owner.
#[derive(Debug, Clone)]
pub enum LinkableShape {
    Class(Rc<ClassShape>),
    Note(Rc<NoteShape>),
    Actor(Rc<ActorShape>),
    UseCase(Rc<UseCaseShape>),
    SdInstance(Rc<SdInstanceShape>),
}

impl LinkableShape {
    /// The document-local identifier of the underlying model object.
    pub fn id(&self) -> ShapeId {
        match self {
            Self::Class(shape) => shape.model.id,
            Self::Note(shape) => shape.model.id,
            Self::Actor(shape) => shape.model.id,
            Self::UseCase(shape) => shape.model.id,
            Self::SdInstance(shape) => shape.model.id,
        }
    }

    /// The display name of the underlying model object.
    ///
    /// Notes have no name; their content is not a name, so they yield an
    /// empty string. Lollipop resolution relies on this to skip them when
    /// scanning for an implementor.
    pub fn name(&self) -> &str {
        match self {
            Self::Class(shape) => &shape.model.name,
            Self::Note(_) => "",
            Self::Actor(shape) => &shape.model.name,
            Self::UseCase(shape) => &shape.model.name,
            Self::SdInstance(shape) => &shape.model.instance_name,
        }
    }

    /// True when both values refer to the identical shape instance, not
    /// merely to equal-looking shapes. Used for self-loop detection.
    pub fn is_same_shape(&self, other: &LinkableShape) -> bool {
        match (self, other) {
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            (Self::Note(a), Self::Note(b)) => Rc::ptr_eq(a, b),
            (Self::Actor(a), Self::Actor(b)) => Rc::ptr_eq(a, b),
            (Self::UseCase(a), Self::UseCase(b)) => Rc::ptr_eq(a, b),
            (Self::SdInstance(a), Self::SdInstance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for LinkableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Class(_) => "class",
            Self::Note(_) => "note",
            Self::Actor(_) => "actor",
            Self::UseCase(_) => "use case",
            Self::SdInstance(_) => "sd instance",
        };
        write!(f, "{kind} #{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassModel;

    fn class_shape(id: i32, name: &str) -> Rc<ClassShape> {
        Rc::new(ClassShape {
            model: ClassModel::new(id, name),
            position: Point::new(0, 0),
            size: Size::new(100, 100),
        })
    }

    #[test]
    fn same_shape_is_identity_not_equality() {
        let a = class_shape(1, "A");
        let twin = class_shape(1, "A");

        let left = LinkableShape::Class(Rc::clone(&a));
        let right = LinkableShape::Class(Rc::clone(&a));
        let other = LinkableShape::Class(twin);

        assert!(left.is_same_shape(&right));
        assert!(!left.is_same_shape(&other));
    }
}
