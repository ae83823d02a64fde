use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use thiserror::Error;

use crate::parser::ParseError;

/// Which of the two compared inputs an error or event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Errors returned by the comparison entry points.
///
/// A structural or content difference is not an error; it is reported as a
/// `false` verdict.
#[derive(Debug, Error)]
pub enum CompareError {
    /// One of the inputs is not well-formed XML.
    #[error("failed to parse {side} document: {source}")]
    Parse {
        side: Side,
        #[source]
        source: ParseError,
    },
    /// A root handed to the comparator is not an element.
    #[error("invalid {side} input: {message}")]
    InvalidInput { side: Side, message: String },
}

impl CompareError {
    pub fn side(&self) -> Side {
        match self {
            CompareError::Parse { side, .. } | CompareError::InvalidInput { side, .. } => *side,
        }
    }
}
