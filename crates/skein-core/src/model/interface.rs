//! Interface model objects, used by lollipop realizations.

use super::member::Method;

/// The model side of a lollipop interface shape.
///
/// `implementors` lists the class names that realize this interface, in
/// file order. Lollipop resolution binds the shape to the first entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceModel {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub implementors: Vec<String>,
    pub methods: Vec<Method>,
}

impl InterfaceModel {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// The class name the lollipop anchors to, when present.
    pub fn primary_implementor(&self) -> Option<&str> {
        self.implementors.first().map(String::as_str)
    }
}
