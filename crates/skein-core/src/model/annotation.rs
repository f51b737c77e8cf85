//! Note and free-standing text model objects.

/// The model side of a UML note shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteModel {
    pub id: i32,
    /// Note body with line endings already normalized to `\n`.
    pub content: String,
    pub file_name: String,
}

/// The model side of a free-standing text shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextModel {
    pub id: i32,
    /// Text body with line endings already normalized to `\n`.
    pub content: String,
}
