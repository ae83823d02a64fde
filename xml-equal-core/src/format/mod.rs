//! Comparison trace formatters.

pub mod json;
pub mod text;

pub use json::format_json;
pub use text::{format_event, format_text, format_verdict};
