//! Semantic XML tree equality.

pub mod engine;
pub mod options;
pub mod trace;

pub use engine::{compare, equal, xml_compare, xml_equal, Comparison};
pub use options::CompareOptions;
pub use trace::TraceEvent;
