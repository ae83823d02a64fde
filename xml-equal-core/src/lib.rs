//! Semantic equality checks for XML documents.
//!
//! Both inputs are parsed into mixed-content trees and compared recursively:
//! tags, attribute sets (order-free) and children in document order. By
//! default whitespace-only text nodes are dropped and text is trimmed first.

pub mod compare;
pub mod error;
pub mod format;
pub mod parser;
pub mod tree;
pub mod writer;

pub use compare::{compare, equal, xml_compare, xml_equal, CompareOptions, Comparison, TraceEvent};
pub use error::{CompareError, Side};
pub use format::{format_event, format_json, format_text, format_verdict};
pub use parser::{parse, parse_file, parse_str, ParseError};
pub use tree::{is_whitespace_only, trim_whitespace, Element, Node, NodeKind, XmlTree, WHITESPACES};
pub use writer::{write, write_file, write_pretty, WriteError};
