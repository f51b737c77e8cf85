//! Whole-document XML element tree.
//!
//! The legacy format is small enough that the entire document is parsed
//! into an owned tree up front; every later stage works on borrowed
//! [`XmlElement`] nodes. Built on quick-xml events.
//!
//! Trimming policy:
//! - whitespace-only text nodes (indentation/pretty-printing) are ignored
//! - non-whitespace text and CDATA are preserved exactly; source-code
//!   lines inside `<Code>` elements depend on this

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::str;

use crate::error::{ParseError, ParseResult};

/// One element of the parsed document: name, attributes in file order,
/// child elements in file order, and accumulated text content.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// The element's tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up an attribute that must be present.
    pub fn required_attribute(&self, name: &'static str) -> ParseResult<&str> {
        self.attribute(name)
            .ok_or_else(|| ParseError::MissingAttribute {
                element: self.name.clone(),
                attribute: name,
            })
    }

    /// All child elements with the given tag name, in file order.
    pub fn children<'e>(&'e self, name: &str) -> impl Iterator<Item = &'e XmlElement> {
        self.children
            .iter()
            .filter(move |child| child.name == name)
    }

    /// The first child with the given tag name, if any.
    pub fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.children(name).next()
    }

    /// The single child with the given tag name; zero or more than one is
    /// a structural error.
    pub fn exactly_one_child(&self, name: &str) -> ParseResult<&XmlElement> {
        let mut matches = self.children(name);
        let first = matches.next().ok_or_else(|| {
            ParseError::malformed(&self.name, format!("expected one <{name}> child, found none"))
        })?;
        if matches.next().is_some() {
            return Err(ParseError::malformed(
                &self.name,
                format!("expected exactly one <{name}> child, found several"),
            ));
        }
        Ok(first)
    }

    /// Accumulated text/CDATA content, whitespace-only nodes excluded.
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn element_from_start(e: &BytesStart<'_>) -> ParseResult<XmlElement> {
    let name = str::from_utf8(e.name().as_ref())?.to_string();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.to_string();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Parse a full XML document into its root element.
pub fn parse_document(xml: &str) -> ParseResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    // No global trim_text: whitespace-only nodes are filtered manually so
    // meaningful text survives untouched.

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(element_from_start(&e)?);
            }
            Event::Empty(e) => {
                let element = element_from_start(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {
                        return Err(ParseError::malformed(
                            element.name,
                            "multiple root elements",
                        ));
                    }
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    ParseError::malformed("document", "unbalanced closing tag")
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {
                        return Err(ParseError::malformed(
                            element.name,
                            "multiple root elements",
                        ));
                    }
                }
            }
            Event::Text(t) => {
                let text = t.decode()?;
                if !text.trim().is_empty()
                    && let Some(current) = stack.last_mut()
                {
                    current.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                let text = c.decode()?;
                if !text.trim().is_empty()
                    && let Some(current) = stack.last_mut()
                {
                    current.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| ParseError::malformed("document", "no root element"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let root = parse_document(
            r#"<PyutProject version="11" CodePath="">
                 <PyutDocument type="CLASS_DIAGRAM" title="T"/>
               </PyutProject>"#,
        )
        .expect("Failed to parse");

        assert_eq!(root.name(), "PyutProject");
        assert_eq!(root.attribute("version"), Some("11"));
        assert_eq!(root.attribute("CodePath"), Some(""));
        let document = root.first_child("PyutDocument").expect("missing child");
        assert_eq!(document.attribute("type"), Some("CLASS_DIAGRAM"));
    }

    #[test]
    fn attribute_values_are_unescaped() {
        let root = parse_document(r#"<Note content="a &amp;#xA; b &lt;ok&gt;"/>"#)
            .expect("Failed to parse");
        assert_eq!(root.attribute("content"), Some("a &#xA; b <ok>"));
    }

    #[test]
    fn element_text_is_preserved() {
        let root = parse_document(
            "<SourceCode>\n    <Code>let x = 1;</Code>\n    <Code>  indented</Code>\n</SourceCode>",
        )
        .expect("Failed to parse");

        let lines: Vec<&str> = root.children("Code").map(|c| c.text()).collect();
        assert_eq!(lines, vec!["let x = 1;", "  indented"]);
    }

    #[test]
    fn exactly_one_child_rejects_zero_and_several() {
        let root = parse_document("<A><B/><B/></A>").expect("Failed to parse");
        assert!(root.exactly_one_child("C").is_err());
        assert!(root.exactly_one_child("B").is_err());

        let root = parse_document("<A><B/></A>").expect("Failed to parse");
        assert!(root.exactly_one_child("B").is_ok());
    }

    #[test]
    fn missing_required_attribute_names_the_element() {
        let root = parse_document("<Class name=\"X\"/>").expect("Failed to parse");
        let err = root.required_attribute("id").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Class"), "unexpected message: {message}");
        assert!(message.contains("id"), "unexpected message: {message}");
    }
}
