use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;
use tracing::trace;

use crate::tree::{is_whitespace_only, Element, Node};

/// Errors that can occur while parsing XML into a [`Node`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML at byte {position}: {source}")]
    Xml {
        position: u64,
        source: quick_xml::Error,
    },
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },
}

/// Parse XML bytes into a tree and return its document element.
///
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// dropped. CDATA is folded into text, and adjacent text fragments are merged
/// into a single text node. Line endings are normalized to `\n` and literal
/// tab/CR/LF in attribute values become spaces; otherwise whitespace is kept
/// verbatim.
pub fn parse(xml: &[u8]) -> Result<Node, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| xml_error(&reader, err))?;

        match event {
            Event::Start(e) => {
                let element = build_element(&e, &reader)?;
                trace!(tag = %element.tag, depth = stack.len(), "open element");
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = build_element(&e, &reader)?;
                attach(element, &mut stack, &mut root, &reader)?;
            }
            Event::Text(e) => {
                let raw = std::str::from_utf8(e.as_ref())?;
                let text = unescape(&normalize_line_endings(raw))
                    .map_err(|err| xml_error(&reader, err))?
                    .into_owned();
                push_text(text, &mut stack, &reader)?;
            }
            Event::CData(e) => {
                let text = normalize_line_endings(std::str::from_utf8(e.as_ref())?).into_owned();
                push_text(text, &mut stack, &reader)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    malformed(&reader, "encountered closing tag without open tag")
                })?;
                attach(element, &mut stack, &mut root, &reader)?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(malformed(&reader, "unclosed element(s) at end of document"));
    }

    root.map(Node::Element)
        .ok_or_else(|| malformed(&reader, "no root element found"))
}

/// Parse an XML string into a tree and return its document element.
pub fn parse_str(xml: &str) -> Result<Node, ParseError> {
    parse(xml.as_bytes())
}

/// Parse an XML file into a tree and return its document element.
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    reader: &Reader<&[u8]>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(malformed(reader, "multiple top-level elements found"));
    }
    Ok(())
}

fn push_text(
    text: String,
    stack: &mut [Element],
    reader: &Reader<&[u8]>,
) -> Result<(), ParseError> {
    let Some(current) = stack.last_mut() else {
        if is_whitespace_only(&text) {
            return Ok(());
        }
        return Err(malformed(reader, "text content outside of the root element"));
    };

    if text.is_empty() {
        return Ok(());
    }

    // Fragments split by CDATA or dropped comments form one text node.
    match current.children.last_mut() {
        Some(Node::Text { data }) => data.push_str(&text),
        _ => current.children.push(Node::text(text)),
    }
    Ok(())
}

fn build_element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element, ParseError> {
    let tag = qname_to_string(e.name())?;
    let mut element = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(reader, err))?;
        let key = qname_to_string(attr.key)?;
        let raw = std::str::from_utf8(attr.value.as_ref())?;
        let value = unescape(&normalize_attribute_value(raw))
            .map_err(|err| xml_error(reader, err))?
            .into_owned();
        element.attributes.insert(key, value);
    }

    Ok(element)
}

/// Line-end handling applied to raw markup before references are expanded,
/// so `&#13;` still yields a carriage return.
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\r') {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
}

fn normalize_attribute_value(raw: &str) -> String {
    normalize_line_endings(raw).replace(|c: char| c == '\t' || c == '\n', " ")
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

fn xml_error(reader: &Reader<&[u8]>, err: impl Into<quick_xml::Error>) -> ParseError {
    ParseError::Xml {
        position: reader.buffer_position() as u64,
        source: err.into(),
    }
}

fn malformed(reader: &Reader<&[u8]>, message: &str) -> ParseError {
    ParseError::Malformed {
        position: reader.buffer_position() as u64,
        message: message.to_string(),
    }
}
