use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::compare::options::CompareOptions;
use crate::compare::trace::TraceEvent;
use crate::error::{CompareError, Side};
use crate::format::text::format_event;
use crate::parser::parse_str;
use crate::tree::{is_whitespace_only, trim_whitespace, NodeKind, XmlTree};

/// Outcome of comparing two trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Verdict of the comparison.
    pub equal: bool,
    /// Steps recorded while comparing. Empty unless tracing was requested.
    pub trace: Vec<TraceEvent>,
}

impl Comparison {
    /// The point where the trees were found to diverge, if traced.
    pub fn first_mismatch(&self) -> Option<&TraceEvent> {
        self.trace.iter().find(|event| event.is_mismatch())
    }
}

/// Decide whether two document elements are equal.
pub fn equal<T: XmlTree>(left: T, right: T, opts: &CompareOptions) -> Result<bool, CompareError> {
    compare(left, right, opts).map(|comparison| comparison.equal)
}

/// Compare two document elements, keeping the trace when requested.
pub fn compare<T: XmlTree>(
    left: T,
    right: T,
    opts: &CompareOptions,
) -> Result<Comparison, CompareError> {
    ensure_element(left, Side::Left)?;
    ensure_element(right, Side::Right)?;

    let mut walker = Walker {
        opts,
        trace: Vec::new(),
    };
    let root_path = left.tag_name().unwrap_or_default().to_string();
    let equal = walker.elements_equal(left, right, &root_path);

    Ok(Comparison {
        equal,
        trace: walker.trace,
    })
}

/// Parse two XML strings and decide whether their document elements are equal.
pub fn xml_equal(left: &str, right: &str, opts: &CompareOptions) -> Result<bool, CompareError> {
    xml_compare(left, right, opts).map(|comparison| comparison.equal)
}

/// Parse two XML strings and compare their document elements.
pub fn xml_compare(
    left: &str,
    right: &str,
    opts: &CompareOptions,
) -> Result<Comparison, CompareError> {
    let left = parse_str(left).map_err(|source| CompareError::Parse {
        side: Side::Left,
        source,
    })?;
    let right = parse_str(right).map_err(|source| CompareError::Parse {
        side: Side::Right,
        source,
    })?;
    compare(&left, &right, opts)
}

fn ensure_element<T: XmlTree>(node: T, side: Side) -> Result<(), CompareError> {
    match node.kind() {
        NodeKind::Element => Ok(()),
        kind => Err(CompareError::InvalidInput {
            side,
            message: format!("expected a document element, found a {kind} node"),
        }),
    }
}

struct Walker<'o> {
    opts: &'o CompareOptions,
    trace: Vec<TraceEvent>,
}

impl Walker<'_> {
    fn record(&mut self, event: impl FnOnce() -> TraceEvent) {
        if !self.opts.trace {
            return;
        }
        let event = event();
        debug!(target: "xml_equal::trace", "{}", format_event(&event));
        self.trace.push(event);
    }

    fn elements_equal<T: XmlTree>(&mut self, left: T, right: T, path: &str) -> bool {
        let left_tag = left.tag_name().unwrap_or_default();
        let right_tag = right.tag_name().unwrap_or_default();
        self.record(|| TraceEvent::Elements {
            path: path.to_string(),
            left: left_tag.to_string(),
            right: right_tag.to_string(),
        });

        if left_tag != right_tag {
            self.record(|| TraceEvent::TagMismatch {
                path: path.to_string(),
                left: left_tag.to_string(),
                right: right_tag.to_string(),
            });
            return false;
        }

        let left_attributes = left.attributes();
        let right_attributes = right.attributes();
        if left_attributes != right_attributes {
            self.record(|| TraceEvent::AttributeMismatch {
                path: path.to_string(),
                left: owned_attributes(&left_attributes),
                right: owned_attributes(&right_attributes),
            });
            return false;
        }

        let left_children = self.comparison_children(left);
        let right_children = self.comparison_children(right);
        if left_children.len() != right_children.len() {
            self.record(|| TraceEvent::ChildCountMismatch {
                path: path.to_string(),
                left: left_children.len(),
                right: right_children.len(),
            });
            return false;
        }

        let mut positions: HashMap<String, usize> = HashMap::new();
        for (left_child, right_child) in left_children.into_iter().zip(right_children) {
            let child_path = child_path(path, left_child, &mut positions);
            let pair_equal = match (left_child.kind(), right_child.kind()) {
                (NodeKind::Element, NodeKind::Element) => {
                    self.elements_equal(left_child, right_child, &child_path)
                }
                (NodeKind::Text, NodeKind::Text) => {
                    self.texts_equal(left_child, right_child, &child_path)
                }
                (left_kind, right_kind) => {
                    self.record(|| TraceEvent::NodeKindMismatch {
                        path: child_path.clone(),
                        left: left_kind,
                        right: right_kind,
                    });
                    false
                }
            };
            if !pair_equal {
                return false;
            }
        }

        true
    }

    fn texts_equal<T: XmlTree>(&mut self, left: T, right: T, path: &str) -> bool {
        let left_raw = left.text().unwrap_or_default();
        let right_raw = right.text().unwrap_or_default();
        self.record(|| TraceEvent::Text {
            path: path.to_string(),
            left: left_raw.to_string(),
            right: right_raw.to_string(),
        });

        let (left_value, right_value) = if self.opts.ignore_whitespace {
            (trim_whitespace(left_raw), trim_whitespace(right_raw))
        } else {
            (left_raw, right_raw)
        };

        // An empty value never conflicts with the other side.
        if !left_value.is_empty() && !right_value.is_empty() && left_value != right_value {
            self.record(|| TraceEvent::TextMismatch {
                path: path.to_string(),
                left: left_raw.to_string(),
                right: right_raw.to_string(),
            });
            return false;
        }
        true
    }

    fn comparison_children<T: XmlTree>(&self, node: T) -> Vec<T> {
        let mut children = node.children();
        if self.opts.ignore_whitespace {
            children.retain(|child| !is_whitespace_text(*child));
        }
        children
    }
}

fn is_whitespace_text<T: XmlTree>(node: T) -> bool {
    node.kind() == NodeKind::Text && is_whitespace_only(node.text().unwrap_or_default())
}

fn child_path<T: XmlTree>(parent: &str, child: T, positions: &mut HashMap<String, usize>) -> String {
    let name = match child.kind() {
        NodeKind::Element => child.tag_name().unwrap_or_default().to_string(),
        NodeKind::Text => "text()".to_string(),
    };
    let position = positions.entry(name.clone()).or_insert(0);
    *position += 1;
    format!("{parent}.{name}[{position}]")
}

fn owned_attributes(attributes: &BTreeMap<&str, &str>) -> BTreeMap<String, String> {
    attributes
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
