use colored::Colorize;
use serde::Serialize;
use xml_equal_core::{format_text, Comparison, TraceEvent};

/// Render trace lines for terminal output.
pub fn render_trace(events: &[TraceEvent]) -> String {
    format_text(events)
        .lines()
        .map(|line| {
            if line.starts_with('!') {
                line.red().to_string()
            } else {
                line.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the verdict line for terminal output.
pub fn render_verdict(comparison: &Comparison) -> String {
    if comparison.equal {
        "equal".green().to_string()
    } else {
        "different".red().bold().to_string()
    }
}

/// JSON document printed by `compare --format json`.
#[derive(Debug, Serialize)]
pub struct CompareReport<'a> {
    pub left: String,
    pub right: String,
    pub ignore_whitespace: bool,
    pub equal: bool,
    pub first_mismatch: Option<&'a TraceEvent>,
    pub trace: &'a [TraceEvent],
}
