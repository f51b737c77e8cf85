//! Error types for parsing legacy diagram XML.

use thiserror::Error;

use skein_core::model::UnknownEnumLiteral;

/// Everything that can go wrong between raw XML text and a loaded
/// [`Project`](skein_core::project::Project).
///
/// Unresolvable link endpoints are deliberately NOT represented here:
/// those are recovered locally (the link is dropped and logged) and the
/// load succeeds. See the crate documentation for the recovery policy.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("utf8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The project root carries a schema version this parser does not
    /// recognize. Never recoverable at runtime.
    #[error("unsupported schema version: {version:?}")]
    UnsupportedVersion { version: String },

    /// A structurally required attribute is missing.
    #[error("element <{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// An attribute that must be an integer held something else.
    #[error("invalid number for {attribute}: {value:?}")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },

    /// An element's structure is wrong: a required child is missing or
    /// repeated where exactly one is expected, or the root element is not
    /// a project.
    #[error("malformed <{element}> element: {detail}")]
    MalformedElement { element: String, detail: String },

    #[error(transparent)]
    UnknownEnumLiteral(#[from] UnknownEnumLiteral),

    /// A document's `type` attribute matched no known diagram kind.
    /// Fatal for the whole load: without the kind there is no way to
    /// choose a sub-assembler.
    #[error("unknown document kind: {kind:?} (document {title:?})")]
    UnknownDocumentKind { kind: String, title: String },
}

impl ParseError {
    pub(crate) fn malformed(element: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedElement {
            element: element.into(),
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type ParseResult<T> = Result<T, ParseError>;
