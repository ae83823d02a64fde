use std::collections::BTreeMap;

use serde::Serialize;

use crate::tree::NodeKind;

/// A single step recorded while comparing two trees.
///
/// Paths name elements by tag and 1-based position among the children that
/// took part in the comparison, e.g. `ROOT.Foo[1]` or `ROOT.text()[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Two elements are about to be compared.
    Elements {
        path: String,
        left: String,
        right: String,
    },
    /// Element tag names differ.
    TagMismatch {
        path: String,
        left: String,
        right: String,
    },
    /// Attribute sets differ.
    AttributeMismatch {
        path: String,
        left: BTreeMap<String, String>,
        right: BTreeMap<String, String>,
    },
    /// Number of compared children differs.
    ChildCountMismatch {
        path: String,
        left: usize,
        right: usize,
    },
    /// One side holds an element where the other holds text.
    NodeKindMismatch {
        path: String,
        left: NodeKind,
        right: NodeKind,
    },
    /// Two text nodes are about to be compared (raw values).
    Text {
        path: String,
        left: String,
        right: String,
    },
    /// Text values differ.
    TextMismatch {
        path: String,
        left: String,
        right: String,
    },
}

impl TraceEvent {
    pub fn path(&self) -> &str {
        match self {
            TraceEvent::Elements { path, .. }
            | TraceEvent::TagMismatch { path, .. }
            | TraceEvent::AttributeMismatch { path, .. }
            | TraceEvent::ChildCountMismatch { path, .. }
            | TraceEvent::NodeKindMismatch { path, .. }
            | TraceEvent::Text { path, .. }
            | TraceEvent::TextMismatch { path, .. } => path,
        }
    }

    /// True for events that mark a point of divergence.
    pub fn is_mismatch(&self) -> bool {
        !matches!(self, TraceEvent::Elements { .. } | TraceEvent::Text { .. })
    }
}
